//! Error types for fact processing
//!
//! Extraction itself never fails; malformed text is skipped. Only the
//! configuration layer and the vault writer touch the outside world.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing a vault to disk
#[derive(Error, Debug)]
pub enum VaultError {
    /// Filesystem operation failed
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being created or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl VaultError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        VaultError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors that can occur while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("Failed to serialize config TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A setting holds an unusable value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
