//! Backend selection

use crate::config::{Engine, LlmConfig};
use crate::{AnthropicProvider, LlmError, OllamaProvider, OpenAiProvider};
use grapher_facts::LlmProvider;
use tracing::debug;

/// One of the HTTP providers, chosen by `LlmConfig::engine`
#[derive(Debug)]
pub enum Provider {
    /// Anthropic Messages API
    Anthropic(AnthropicProvider),
    /// OpenAI Chat Completions API
    OpenAi(OpenAiProvider),
    /// Local Ollama server
    Ollama(OllamaProvider),
}

impl Provider {
    /// Build the configured provider, reading its API key from the environment
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        Self::from_config_with(config, |name| std::env::var(name).ok())
    }

    /// Build the configured provider, resolving the API key through `lookup`
    pub fn from_config_with<F>(config: &LlmConfig, lookup: F) -> Result<Self, LlmError>
    where
        F: Fn(&str) -> Option<String>,
    {
        config.validate()?;
        let api_key = config.api_key_with(lookup)?.unwrap_or_default();
        debug!(engine = ?config.engine, model = config.model(), endpoint = config.endpoint(), "building provider");

        Ok(match config.engine {
            Engine::Anthropic => Provider::Anthropic(AnthropicProvider::new(config, api_key)?),
            Engine::OpenAi => Provider::OpenAi(OpenAiProvider::new(config, api_key)?),
            Engine::Ollama => Provider::Ollama(OllamaProvider::new(config)?),
        })
    }
}

impl LlmProvider for Provider {
    type Error = LlmError;

    fn generate(&self, prompt: &str, text: &str) -> Result<String, Self::Error> {
        match self {
            Provider::Anthropic(provider) => provider.generate(prompt, text),
            Provider::OpenAi(provider) => provider.generate(prompt, text),
            Provider::Ollama(provider) => provider.generate(prompt, text),
        }
    }
}
