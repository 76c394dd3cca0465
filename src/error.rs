use thiserror::Error;

/// Failure of the secure entropy source.
///
/// Never returned to callers of [`crate::Randomizer`]; it is handed to the
/// diagnostic sink and the fallback generator takes over.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntropyError {
    #[error("entropy source unavailable: {0}")]
    Unavailable(String),
    #[error("entropy source disabled: {0}")]
    Disabled(String),
}

/// Caller contract violations reported by the checked operations.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RandomError {
    #[error("invalid range: max ({max}) is less than min ({min})")]
    InvalidRange { min: i64, max: i64 },
    #[error("cannot draw from an empty pool")]
    EmptyPool,
}
