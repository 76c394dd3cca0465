use std::{fs::File, path::Path};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::pool::PoolKind;

/// Defaults for the command-line generator, overridable per flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    // Pool used by `string`
    pub pool: PoolKind,

    // Characters per generated string
    pub length: usize,

    // How many values to print
    pub count: usize,

    // Inclusive bounds used by `int`
    pub min: i64,
    pub max: i64,

    // Bytes per value for `bytes`
    pub bytes: usize,
}

impl GeneratorConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut file = File::open(path)?;
        let config = serde_json::from_reader(&mut file)?;
        Ok(config)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            pool: PoolKind::Token,
            length: 32,
            count: 1,
            min: 0,
            max: 100,
            bytes: 16,
        }
    }
}
