//! Grapher LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `grapher-facts`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `AnthropicProvider`: Anthropic Messages API
//! - `OpenAiProvider`: OpenAI Chat Completions API
//! - `OllamaProvider`: Local Ollama API
//!
//! `Provider` picks one of the HTTP backends from an `LlmConfig`.
//!
//! # Examples
//!
//! ```
//! use grapher_llm::MockProvider;
//! use grapher_facts::LlmProvider;
//!
//! let provider = MockProvider::new("knows(ada, babbage).");
//! let result = provider.generate("system prompt", "Ada knows Babbage.").unwrap();
//! assert_eq!(result, "knows(ada, babbage).");
//! ```

#![warn(missing_docs)]

pub mod anthropic;
pub mod config;
mod http;
pub mod ollama;
pub mod openai;
mod provider;

use grapher_facts::LlmProvider;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use anthropic::AnthropicProvider;
pub use config::{Engine, LlmConfig};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use provider::Provider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// The API rejected the credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// No API key in the environment
    #[error("Missing API key: set the {0} environment variable")]
    MissingApiKey(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock LLM provider for deterministic testing
///
/// Replies are looked up by the input text, so each chunk of a document can
/// get its own answer. Every call is recorded.
///
/// # Examples
///
/// ```
/// use grapher_llm::MockProvider;
/// use grapher_facts::LlmProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("chunk one", "p(a, b).");
/// provider.add_error("chunk two");
///
/// assert_eq!(provider.generate("prompt", "chunk one").unwrap(), "p(a, b).");
/// assert!(provider.generate("prompt", "chunk two").is_err());
/// assert_eq!(provider.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, Option<String>>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all inputs
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a specific response for a given input text
    pub fn add_response(&mut self, text: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(text.into(), Some(response.into()));
    }

    /// Configure to return an error for a specific input text
    pub fn add_error(&mut self, text: impl Into<String>) {
        lock(&self.responses).insert(text.into(), None);
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Prompt and input text of every call, oldest first
    pub fn calls(&self) -> Vec<(String, String)> {
        lock(&self.calls).clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str, text: &str) -> Result<String, Self::Error> {
        lock(&self.calls).push((prompt.to_string(), text.to_string()));

        match lock(&self.responses).get(text) {
            Some(Some(response)) => Ok(response.clone()),
            Some(None) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
