//! Configuration for extraction, chunking and vault generation

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Text chunking strategy for long documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkStrategy {
    /// Pack whitespace-separated words up to the size limit
    ByWord,
    /// Pack blank-line separated paragraphs up to the size limit
    ByParagraph,
}

impl Default for ChunkStrategy {
    fn default() -> Self {
        ChunkStrategy::ByWord
    }
}

/// Configuration for the fact extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Remove Markdown code fences (```` ```prolog ````) before scanning
    pub strip_code_fences: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            strip_code_fences: false,
        }
    }
}

/// Configuration for generating facts with a language model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Classes and relations the model may use; empty selects the built-in list
    pub ontology: String,

    /// Subject area for a second, correcting pass over each chunk's facts.
    /// The pass is skipped when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_domain: Option<String>,
}

/// Configuration for the text chunker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// How to split the text
    pub strategy: ChunkStrategy,

    /// Maximum chunk size (characters)
    pub max_chunk_size: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            strategy: ChunkStrategy::ByWord,
            max_chunk_size: 2_000,
        }
    }
}

/// Configuration for the vault writer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Folder receiving notes for subjects with no arity 1 category
    pub uncategorized_dir: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            uncategorized_dir: "uncategorized".to_string(),
        }
    }
}

/// Complete configuration, as stored in a TOML file
///
/// # Examples
///
/// ```
/// use grapher_facts::GrapherConfig;
///
/// let config = GrapherConfig::from_toml("[chunker]\nmax_chunk_size = 500\n").unwrap();
/// assert_eq!(config.chunker.max_chunk_size, 500);
/// assert!(!config.extractor.strip_code_fences);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrapherConfig {
    /// Extractor settings
    pub extractor: ExtractorConfig,

    /// Chunker settings
    pub chunker: ChunkerConfig,

    /// Fact generator settings
    pub generator: GeneratorConfig,

    /// Vault writer settings
    pub vault: VaultConfig,
}

impl GrapherConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunker.max_chunk_size == 0 {
            return Err(ConfigError::Invalid(
                "chunker.max_chunk_size must be greater than 0".to_string(),
            ));
        }
        let dir = self.vault.uncategorized_dir.trim();
        if dir.is_empty() || dir == "." || dir == ".." || dir.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "vault.uncategorized_dir must be a plain folder name, got '{}'",
                self.vault.uncategorized_dir
            )));
        }
        if let Some(domain) = &self.generator.review_domain {
            if domain.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "generator.review_domain must not be empty when set".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: GrapherConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
