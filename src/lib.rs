//! Random integers, bytes, booleans and strings for application-level use
//! (tokens, ids, sampling).
//!
//! Values come from the operating system's secure source when it works and
//! from a seeded, lock-protected generator when it does not. The degradation
//! is logged, never returned as an error.
//!
//! ```no_run
//! use sfrand::{pool, Randomizer, Randomness};
//!
//! let randomizer = Randomizer::new();
//! let die = randomizer.int(1, 6);
//! let session_id = randomizer.string(32, &pool::token_pool());
//! ```

pub mod config;
pub mod error;
pub mod pool;
pub mod random;

pub use self::{
    error::{EntropyError, RandomError},
    pool::PoolKind,
    random::{
        diagnostics::{DegradationEvent, DiagnosticSink, LogSink, Operation},
        entropy::{DisabledEntropy, EntropySource, OsEntropy},
        Randomizer, RandomizerBuilder, Randomness,
    },
};
