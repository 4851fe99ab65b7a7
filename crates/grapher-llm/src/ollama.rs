//! Ollama Provider Implementation
//!
//! Talks to a local Ollama server, so no API key is needed.

use crate::config::LlmConfig;
use crate::http::HttpClient;
use crate::LlmError;
use grapher_facts::LlmProvider;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Calls `POST {endpoint}/api/generate` with streaming disabled
#[derive(Debug)]
pub struct OllamaProvider {
    http: HttpClient,
    endpoint: String,
    model: String,
}

/// Request body for Ollama generate API
#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Response from Ollama generate API
#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Create a provider from configuration
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        Ok(Self {
            http: HttpClient::new(Duration::from_secs(config.timeout_secs), config.max_retries)?,
            endpoint: config.endpoint().to_string(),
            model: config.model().to_string(),
        })
    }
}

impl LlmProvider for OllamaProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str, text: &str) -> Result<String, Self::Error> {
        let url = format!("{}/api/generate", self.endpoint);
        let request = OllamaGenerateRequest {
            model: &self.model,
            system: prompt,
            prompt: text,
            stream: false,
        };
        let response: OllamaGenerateResponse =
            self.http.post_json(&url, &[], &request, &self.model)?;
        Ok(response.response)
    }
}
