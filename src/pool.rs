use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

// Safe in URLs and headers without escaping
const TOKEN_SYMBOLS: &str = "$-_!()[]{}~+*";

// Drops 1, i, l, 0 and the vowels a, e, o, u
const UNAMBIGUOUS_LOWERCASE: &str = "bcdfghjkmnpqrstvwxyz";
const UNAMBIGUOUS_DIGITS: &str = "23456789";
const UNAMBIGUOUS_UPPERCASE: &str = "BCDFGHJKLMNPQRSTVWXYZ";

fn collect(parts: &[&str]) -> Vec<char> {
    parts.iter().flat_map(|part| part.chars()).collect()
}

/// Returns 0-9
pub fn numeric_pool() -> Vec<char> {
    collect(&[DIGITS])
}

/// Returns a-z
pub fn alphabetic_lowercase_pool() -> Vec<char> {
    collect(&[LOWERCASE])
}

/// Returns a-z followed by A-Z
pub fn alphabetic_pool() -> Vec<char> {
    collect(&[LOWERCASE, UPPERCASE])
}

/// Returns a-z followed by 0-9
pub fn alphanumeric_lowercase_pool() -> Vec<char> {
    collect(&[LOWERCASE, DIGITS])
}

/// Returns a-z, 0-9, A-Z
pub fn alphanumeric_pool() -> Vec<char> {
    collect(&[LOWERCASE, DIGITS, UPPERCASE])
}

/// Returns the alphanumeric pool followed by `$ - _ ! ( ) [ ] { } ~ + *`.
///
/// Intended for generated tokens such as session ids or api keys.
pub fn token_pool() -> Vec<char> {
    collect(&[LOWERCASE, DIGITS, UPPERCASE, TOKEN_SYMBOLS])
}

/// Returns lowercase letters and digits without `1, i, l, 0, a, e, o, u`.
///
/// Useful for human-readable ids like shortened urls.
pub fn unambiguous_lowercase_pool() -> Vec<char> {
    collect(&[UNAMBIGUOUS_LOWERCASE, UNAMBIGUOUS_DIGITS])
}

/// Same as [`unambiguous_lowercase_pool`] plus uppercase letters without
/// `A, E, I, O, U`.
pub fn unambiguous_pool() -> Vec<char> {
    collect(&[
        UNAMBIGUOUS_LOWERCASE,
        UNAMBIGUOUS_DIGITS,
        UNAMBIGUOUS_UPPERCASE,
    ])
}

/// Bits of entropy in a string of `length` characters drawn uniformly from a
/// pool of `pool_len` characters.
pub fn entropy_bits(pool_len: usize, length: usize) -> f64 {
    if pool_len == 0 {
        return 0.0;
    }
    length as f64 * (pool_len as f64).log2()
}

#[derive(Debug, Error)]
#[error("unknown pool `{0}`")]
pub struct UnknownPool(String);

/// Named handle for each of the fixed pools.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PoolKind {
    Numeric,
    AlphabeticLowercase,
    Alphabetic,
    AlphanumericLowercase,
    Alphanumeric,
    #[default]
    Token,
    UnambiguousLowercase,
    Unambiguous,
}

impl PoolKind {
    pub const ALL: [PoolKind; 8] = [
        PoolKind::Numeric,
        PoolKind::AlphabeticLowercase,
        PoolKind::Alphabetic,
        PoolKind::AlphanumericLowercase,
        PoolKind::Alphanumeric,
        PoolKind::Token,
        PoolKind::UnambiguousLowercase,
        PoolKind::Unambiguous,
    ];

    pub fn chars(self) -> Vec<char> {
        match self {
            PoolKind::Numeric => numeric_pool(),
            PoolKind::AlphabeticLowercase => alphabetic_lowercase_pool(),
            PoolKind::Alphabetic => alphabetic_pool(),
            PoolKind::AlphanumericLowercase => alphanumeric_lowercase_pool(),
            PoolKind::Alphanumeric => alphanumeric_pool(),
            PoolKind::Token => token_pool(),
            PoolKind::UnambiguousLowercase => unambiguous_lowercase_pool(),
            PoolKind::Unambiguous => unambiguous_pool(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PoolKind::Numeric => "numeric",
            PoolKind::AlphabeticLowercase => "alphabetic-lowercase",
            PoolKind::Alphabetic => "alphabetic",
            PoolKind::AlphanumericLowercase => "alphanumeric-lowercase",
            PoolKind::Alphanumeric => "alphanumeric",
            PoolKind::Token => "token",
            PoolKind::UnambiguousLowercase => "unambiguous-lowercase",
            PoolKind::Unambiguous => "unambiguous",
        }
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for PoolKind {
    type Err = UnknownPool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PoolKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownPool(s.to_string()))
    }
}
