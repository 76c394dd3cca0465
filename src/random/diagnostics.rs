use std::{fmt, sync::Arc};

use log::{error, warn};

/// The operation that had to fall back to the seeded generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Seeding the fallback generator at construction.
    Seed,
    Int { min: i64, max: i64 },
    Bytes { len: usize },
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Seed => write!(f, "Seed"),
            Operation::Int { min, max } => write!(f, "Int({}, {})", min, max),
            Operation::Bytes { len } => write!(f, "Bytes({})", len),
        }
    }
}

/// A secure-source failure that was recovered by degrading to the fallback
/// generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradationEvent {
    pub operation: Operation,
    pub cause: String,
}

/// Receives degradation events from a [`crate::Randomizer`].
pub trait DiagnosticSink: Send + Sync {
    fn degraded(&self, event: &DegradationEvent);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Arc<T> {
    fn degraded(&self, event: &DegradationEvent) {
        (**self).degraded(event)
    }
}

/// Default sink, forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn degraded(&self, event: &DegradationEvent) {
        match event.operation {
            Operation::Seed => warn!(
                "failed to seed fallback generator with cryptographically secure random number generator, seeding from system time. Reason: {}",
                event.cause
            ),
            operation => error!(
                "failed to use cryptographically secure random number generator for {}. Reason: {}",
                operation, event.cause
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Int { min: -3, max: 9 }.to_string(), "Int(-3, 9)");
        assert_eq!(Operation::Bytes { len: 16 }.to_string(), "Bytes(16)");
        assert_eq!(Operation::Seed.to_string(), "Seed");
    }
}
