use rand::{rngs::OsRng, TryRngCore};

use crate::error::EntropyError;

/// A cryptographically secure source of random bytes.
///
/// Implementations must be safe to call from many threads at once; the
/// randomizer never locks around them.
pub trait EntropySource: Send + Sync {
    /// Fills `dest` completely or fails.
    fn fill(&self, dest: &mut [u8]) -> Result<(), EntropyError>;

    fn next_u64(&self) -> Result<u64, EntropyError> {
        let mut buf = [0u8; 8];
        self.fill(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }
}

/// Operating system entropy via [`OsRng`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        let mut rng = OsRng;
        rng.try_fill_bytes(dest)
            .map_err(|e| EntropyError::Unavailable(e.to_string()))
    }

    fn next_u64(&self) -> Result<u64, EntropyError> {
        let mut rng = OsRng;
        rng.try_next_u64()
            .map_err(|e| EntropyError::Unavailable(e.to_string()))
    }
}

/// An entropy source that always fails, forcing every draw onto the seeded
/// fallback generator.
#[derive(Debug, Clone)]
pub struct DisabledEntropy {
    reason: String,
}

impl DisabledEntropy {
    pub fn new(reason: impl Into<String>) -> Self {
        DisabledEntropy {
            reason: reason.into(),
        }
    }
}

impl Default for DisabledEntropy {
    fn default() -> Self {
        DisabledEntropy::new("secure source disabled")
    }
}

impl EntropySource for DisabledEntropy {
    fn fill(&self, _dest: &mut [u8]) -> Result<(), EntropyError> {
        Err(EntropyError::Disabled(self.reason.clone()))
    }
}

/// Draws a uniform value in `[0, span]` from `source`.
///
/// Words below `2^64 mod (span + 1)` are rejected so every residue is hit by
/// the same number of words.
pub(crate) fn uniform_inclusive(
    source: &dyn EntropySource,
    span: u64,
) -> Result<u64, EntropyError> {
    let Some(n) = span.checked_add(1) else {
        return source.next_u64();
    };
    let threshold = n.wrapping_neg() % n;

    loop {
        let word = source.next_u64()?;
        if word >= threshold {
            return Ok(word % n);
        }
    }
}
