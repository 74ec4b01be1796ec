//! Lowering configuration
//!
//! Library callers build [`LowerOptions`] directly; the command-line driver
//! reads it from a TOML file:
//!
//! ```toml
//! dead_code = "lower"
//! verify = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// What to do with statements that follow an unconditional exit
/// (`return`, `break`, `continue`) in the same sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadCodePolicy {
    /// Drop the trailing statements
    #[default]
    Skip,
    /// Lower them into fresh blocks that have no predecessors
    Lower,
    /// Fail with [`crate::LowerError::UnreachableCode`]
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LowerOptions {
    pub dead_code: DeadCodePolicy,
    /// Run [`crate::Cfg::verify`] on every finished graph
    pub verify: bool,
}

impl Default for LowerOptions {
    fn default() -> Self {
        Self {
            dead_code: DeadCodePolicy::Skip,
            verify: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl LowerOptions {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}
