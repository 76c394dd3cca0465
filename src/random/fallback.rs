use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::{SystemTime, UNIX_EPOCH},
};

use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

/// Seeded, non-secure generator shared by the `Int` and `Bytes` fallback
/// paths. One lock, held only for the duration of a single draw.
#[derive(Debug)]
pub(crate) struct Fallback {
    rng: Mutex<StdRng>,
}

impl Fallback {
    pub(crate) fn new(seed: u64) -> Self {
        Fallback {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    // A panic while holding the lock cannot leave StdRng in a bad state
    fn lock(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Uniform value in `[0, span]`.
    pub(crate) fn uniform_inclusive(&self, span: u64) -> u64 {
        self.lock().random_range(0..=span)
    }

    pub(crate) fn fill(&self, dest: &mut [u8]) {
        self.lock().fill_bytes(dest);
    }
}

/// Low-quality seed used when the secure source cannot provide one.
pub(crate) fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
