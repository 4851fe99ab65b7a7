//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid settings in the config file or on the command line
    #[error(transparent)]
    Settings(#[from] grapher_facts::ConfigError),

    /// Fact generation could not start
    #[error("LLM error: {0}")]
    Llm(#[from] grapher_llm::LlmError),

    /// Vault generation failed
    #[error("Vault error: {0}")]
    Vault(#[from] grapher_facts::VaultError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
