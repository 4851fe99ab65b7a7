//! Provider selection and connection settings

use crate::LlmError;
use serde::{Deserialize, Serialize};

/// Default timeout for LLM requests (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default completion budget for APIs that require one
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Completion backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Anthropic Messages API
    #[default]
    Anthropic,
    /// OpenAI Chat Completions API
    OpenAi,
    /// Local Ollama server
    Ollama,
}

impl Engine {
    /// Model used when none is configured
    pub fn default_model(self) -> &'static str {
        match self {
            Engine::Anthropic => "claude-3-5-sonnet-20240620",
            Engine::OpenAi => "gpt-4o-mini",
            Engine::Ollama => "llama3",
        }
    }

    /// API base URL used when none is configured
    pub fn default_endpoint(self) -> &'static str {
        match self {
            Engine::Anthropic => "https://api.anthropic.com",
            Engine::OpenAi => "https://api.openai.com",
            Engine::Ollama => "http://localhost:11434",
        }
    }

    /// Environment variable holding the API key, if the engine needs one
    pub fn default_api_key_env(self) -> Option<&'static str> {
        match self {
            Engine::Anthropic => Some("ANTHROPIC_API_KEY"),
            Engine::OpenAi => Some("OPENAI_API_KEY"),
            Engine::Ollama => None,
        }
    }
}

/// LLM settings, stored under `[llm]` in the CLI config file.
///
/// API keys are never stored in the file; they are read from the
/// environment variable named by `api_key_env`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Backend to call
    pub engine: Engine,

    /// Model name, defaulting per engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// API base URL, defaulting per engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Environment variable with the API key, defaulting per engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Completion budget per request
    pub max_tokens: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Attempts per request before giving up
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            engine: Engine::default(),
            model: None,
            endpoint: None,
            api_key_env: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl LlmConfig {
    /// Model to request
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(self.engine.default_model())
    }

    /// API base URL without a trailing slash
    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or(self.engine.default_endpoint())
            .trim_end_matches('/')
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), LlmError> {
        if self.model().trim().is_empty() {
            return Err(LlmError::Other("llm.model must not be empty".to_string()));
        }
        if self.max_retries == 0 {
            return Err(LlmError::Other("llm.max_retries must be at least 1".to_string()));
        }
        if self.max_tokens == 0 {
            return Err(LlmError::Other("llm.max_tokens must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// Read the API key from the process environment
    pub fn api_key(&self) -> Result<Option<String>, LlmError> {
        self.api_key_with(|name| std::env::var(name).ok())
    }

    /// Resolve the API key through `lookup`.
    ///
    /// Returns `Ok(None)` for engines that need no key and an error when a
    /// required key is missing or blank.
    pub fn api_key_with<F>(&self, lookup: F) -> Result<Option<String>, LlmError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let name = match (&self.api_key_env, self.engine.default_api_key_env()) {
            (Some(name), _) => name.as_str(),
            (None, Some(name)) => name,
            (None, None) => return Ok(None),
        };

        match lookup(name) {
            Some(key) if !key.trim().is_empty() => Ok(Some(key)),
            _ => Err(LlmError::MissingApiKey(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LlmConfig::default();
        assert_eq!(config.engine, Engine::Anthropic);
        assert_eq!(config.model(), "claude-3-5-sonnet-20240620");
        assert_eq!(config.endpoint(), "https://api.anthropic.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = LlmConfig {
            engine: Engine::Ollama,
            model: Some("mistral".to_string()),
            endpoint: Some("http://gpu-box:11434/".to_string()),
            ..LlmConfig::default()
        };
        assert_eq!(config.model(), "mistral");
        assert_eq!(config.endpoint(), "http://gpu-box:11434");
    }

    #[test]
    fn test_invalid_values() {
        let mut config = LlmConfig {
            max_retries: 0,
            ..LlmConfig::default()
        };
        assert!(config.validate().is_err());

        config.max_retries = 1;
        config.model = Some(" ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_lookup() {
        let config = LlmConfig::default();
        let key = config
            .api_key_with(|name| (name == "ANTHROPIC_API_KEY").then(|| "sk-test".to_string()))
            .unwrap();
        assert_eq!(key.as_deref(), Some("sk-test"));

        let missing = config.api_key_with(|_| None);
        assert!(matches!(missing, Err(LlmError::MissingApiKey(name)) if name == "ANTHROPIC_API_KEY"));

        let blank = config.api_key_with(|_| Some("  ".to_string()));
        assert!(blank.is_err());
    }

    #[test]
    fn test_custom_key_variable() {
        let config = LlmConfig {
            engine: Engine::OpenAi,
            api_key_env: Some("WORK_OPENAI_KEY".to_string()),
            ..LlmConfig::default()
        };
        let key = config
            .api_key_with(|name| (name == "WORK_OPENAI_KEY").then(|| "k".to_string()))
            .unwrap();
        assert_eq!(key.as_deref(), Some("k"));
    }

    #[test]
    fn test_ollama_needs_no_key() {
        let config = LlmConfig {
            engine: Engine::Ollama,
            ..LlmConfig::default()
        };
        assert_eq!(config.api_key_with(|_| None).unwrap(), None);
    }

    #[test]
    fn test_engine_names() {
        let config: LlmConfig = serde_json::from_str(r#"{"engine": "openai"}"#).unwrap();
        assert_eq!(config.engine, Engine::OpenAi);
        assert_eq!(config.model(), "gpt-4o-mini");
    }
}
