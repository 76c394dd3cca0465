//! Secure-first random value generation with a seeded fallback.
//!
//! Every draw goes to the [`EntropySource`] first. When that fails, the
//! failure is reported to the [`DiagnosticSink`] and the draw is served by a
//! seeded, mutex-protected [`StdRng`](rand::rngs::StdRng) instead. Callers
//! always get a value.

use std::{fmt, sync::Arc};

use log::trace;

use crate::error::RandomError;

use self::{
    diagnostics::{DegradationEvent, DiagnosticSink, LogSink, Operation},
    entropy::{uniform_inclusive, EntropySource, OsEntropy},
    fallback::{time_seed, Fallback},
};

pub mod diagnostics;
pub mod entropy;
mod fallback;

/// The five generation operations.
///
/// `bool`, `rune` and `string` are derived from `int`, so an implementor only
/// decides where integers and bytes come from.
pub trait Randomness: Send + Sync {
    /// Uniform integer in `[min, max]`.
    ///
    /// # Panics
    /// Panics if `max < min`.
    fn int(&self, min: i64, max: i64) -> i64;

    /// `n` random bytes.
    fn bytes(&self, n: usize) -> Vec<u8>;

    fn bool(&self) -> bool {
        self.int(0, 1) == 1
    }

    /// A single character drawn uniformly from `pool`.
    ///
    /// # Panics
    /// Panics if `pool` is empty.
    fn rune(&self, pool: &[char]) -> char {
        assert!(!pool.is_empty(), "cannot draw from an empty pool");
        let index = self.int(0, pool.len() as i64 - 1);
        pool[index as usize]
    }

    /// `length` independent draws from `pool`, repeats allowed.
    ///
    /// Each character carries `log2(pool.len())` bits; size `length` for the
    /// entropy you need (see [`crate::pool::entropy_bits`]).
    ///
    /// # Panics
    /// Panics if `pool` is empty and `length > 0`.
    fn string(&self, length: usize, pool: &[char]) -> String {
        (0..length).map(|_| self.rune(pool)).collect()
    }

    fn try_int(&self, min: i64, max: i64) -> Result<i64, RandomError> {
        if max < min {
            return Err(RandomError::InvalidRange { min, max });
        }
        Ok(self.int(min, max))
    }

    fn try_rune(&self, pool: &[char]) -> Result<char, RandomError> {
        if pool.is_empty() {
            return Err(RandomError::EmptyPool);
        }
        Ok(self.rune(pool))
    }

    fn try_string(&self, length: usize, pool: &[char]) -> Result<String, RandomError> {
        if pool.is_empty() {
            return Err(RandomError::EmptyPool);
        }
        Ok(self.string(length, pool))
    }
}

/// Long-lived random value generator.
///
/// Cheap to share: wrap it in an `Arc` or hand out references, all
/// operations take `&self`.
pub struct Randomizer {
    entropy: Box<dyn EntropySource>,
    sink: Arc<dyn DiagnosticSink>,
    fallback: Fallback,
}

impl Randomizer {
    /// OS entropy, seeded fallback, degradations reported through `log`.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> RandomizerBuilder {
        RandomizerBuilder::default()
    }

    fn degrade(&self, operation: Operation, cause: impl fmt::Display) {
        self.sink.degraded(&DegradationEvent {
            operation,
            cause: cause.to_string(),
        });
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Randomizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Randomizer").finish_non_exhaustive()
    }
}

impl Randomness for Randomizer {
    fn int(&self, min: i64, max: i64) -> i64 {
        assert!(max >= min, "max ({}) must not be less than min ({})", max, min);
        let span = max.abs_diff(min);

        let offset = match uniform_inclusive(self.entropy.as_ref(), span) {
            Ok(offset) => offset,
            Err(err) => {
                self.degrade(Operation::Int { min, max }, &err);
                self.fallback.uniform_inclusive(span)
            }
        };

        min.wrapping_add_unsigned(offset)
    }

    fn bytes(&self, n: usize) -> Vec<u8> {
        let mut buf = vec![0u8; n];

        if let Err(err) = self.entropy.fill(&mut buf) {
            self.degrade(Operation::Bytes { len: n }, &err);
            self.fallback.fill(&mut buf);
        }

        buf
    }
}

/// Assembles a [`Randomizer`] with a custom entropy source, seed or sink.
#[derive(Default)]
pub struct RandomizerBuilder {
    entropy: Option<Box<dyn EntropySource>>,
    sink: Option<Arc<dyn DiagnosticSink>>,
    seed: Option<u64>,
}

impl RandomizerBuilder {
    pub fn entropy(mut self, source: impl EntropySource + 'static) -> Self {
        self.entropy = Some(Box::new(source));
        self
    }

    pub fn sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Fixes the fallback generator's seed, making its sequence reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Never fails; without an explicit seed, one is read from the entropy
    /// source, or from the system clock if that read fails.
    pub fn build(self) -> Randomizer {
        let entropy = self.entropy.unwrap_or_else(|| Box::new(OsEntropy));
        let sink = self.sink.unwrap_or_else(|| Arc::new(LogSink));

        let seed = match self.seed {
            Some(seed) => seed,
            None => entropy.next_u64().unwrap_or_else(|err| {
                sink.degraded(&DegradationEvent {
                    operation: Operation::Seed,
                    cause: err.to_string(),
                });
                time_seed()
            }),
        };
        trace!("fallback generator seeded");

        Randomizer {
            entropy,
            sink,
            fallback: Fallback::new(seed),
        }
    }
}
