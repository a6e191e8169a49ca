//! Resource limits applied while parsing.
//!
//! Parsing itself is iterative, but rendering, comparing and proving a formula recurse over its
//! tree. The limits below bound that recursion so pathological inputs fail with an
//! [`Error`](crate::error::Error) instead of exhausting the stack.
//!
//! Limits can be loaded from TOML; missing keys fall back to their defaults:
//! ```
//! use gentzen::config::ProverConfig;
//!
//! let config = ProverConfig::from_toml_str("max_nesting_depth = 32").unwrap();
//! assert_eq!(config.max_nesting_depth, 32);
//! assert_eq!(config.max_input_len, ProverConfig::default().max_input_len);
//! ```
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error while reading configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProverConfig {
    /// Maximum length of the source text, in bytes.
    pub max_input_len: usize,
    /// Maximum depth of a parsed formula tree. An atom has depth 1.
    ///
    /// Binary chains such as `a&&b&&c` gain one level per operator, so the default admits any
    /// such chain that fits in the default input length.
    pub max_nesting_depth: usize,
}

impl ProverConfig {
    pub const DEFAULT_MAX_INPUT_LEN: usize = 4096;
    pub const DEFAULT_MAX_NESTING_DEPTH: usize = 2048;

    /// A configuration that never rejects input on size grounds.
    pub fn unlimited() -> Self {
        Self {
            max_input_len: usize::MAX,
            max_nesting_depth: usize::MAX,
        }
    }

    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(src)?;
        debug!("Loaded prover configuration: {config:?}");
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn load_from_toml(path: &Path) -> Result<Self, ConfigError> {
        let src = std::fs::read_to_string(path)?;
        Self::from_toml_str(&src)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}

impl Default for ProverConfig {
    fn default() -> Self {
        Self {
            max_input_len: Self::DEFAULT_MAX_INPUT_LEN,
            max_nesting_depth: Self::DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}
