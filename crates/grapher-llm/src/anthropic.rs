//! Anthropic Messages API provider

use crate::config::LlmConfig;
use crate::http::HttpClient;
use crate::LlmError;
use grapher_facts::LlmProvider;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// API version sent with every request
pub const API_VERSION: &str = "2023-06-01";

/// Calls `POST {endpoint}/v1/messages` with the prompt as the system message
#[derive(Debug)]
pub struct AnthropicProvider {
    http: HttpClient,
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicProvider {
    /// Create a provider from configuration and an API key
    pub fn new(config: &LlmConfig, api_key: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            http: HttpClient::new(Duration::from_secs(config.timeout_secs), config.max_retries)?,
            endpoint: config.endpoint().to_string(),
            model: config.model().to_string(),
            api_key: api_key.into(),
            max_tokens: config.max_tokens,
        })
    }

    fn request<'a>(&'a self, prompt: &'a str, text: &'a str) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: prompt,
            messages: [Message {
                role: "user",
                content: text,
            }],
        }
    }
}

fn reply_text(response: MessagesResponse) -> Result<String, LlmError> {
    match response.content.into_iter().next() {
        Some(ContentBlock {
            kind,
            text: Some(text),
        }) if kind == "text" => Ok(text),
        Some(_) => Err(LlmError::InvalidResponse("response is not text".to_string())),
        None => Err(LlmError::InvalidResponse("response has no content".to_string())),
    }
}

impl LlmProvider for AnthropicProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str, text: &str) -> Result<String, Self::Error> {
        let url = format!("{}/v1/messages", self.endpoint);
        let headers = [
            ("x-api-key", self.api_key.clone()),
            ("anthropic-version", API_VERSION.to_string()),
        ];
        let response: MessagesResponse =
            self.http
                .post_json(&url, &headers, &self.request(prompt, text), &self.model)?;
        reply_text(response)
    }
}
