//! OpenAI Chat Completions API provider

use crate::config::LlmConfig;
use crate::http::HttpClient;
use crate::LlmError;
use grapher_facts::LlmProvider;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Calls `POST {endpoint}/v1/chat/completions` with a system and a user message
#[derive(Debug)]
pub struct OpenAiProvider {
    http: HttpClient,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a provider from configuration and an API key
    pub fn new(config: &LlmConfig, api_key: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            http: HttpClient::new(Duration::from_secs(config.timeout_secs), config.max_retries)?,
            endpoint: config.endpoint().to_string(),
            model: config.model().to_string(),
            api_key: api_key.into(),
        })
    }

    fn request<'a>(&'a self, prompt: &'a str, text: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: prompt,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
        }
    }
}

fn reply_text(response: ChatResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| LlmError::InvalidResponse("response has no message content".to_string()))
}

impl LlmProvider for OpenAiProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str, text: &str) -> Result<String, Self::Error> {
        let url = format!("{}/v1/chat/completions", self.endpoint);
        let headers = [("authorization", format!("Bearer {}", self.api_key))];
        let response: ChatResponse =
            self.http
                .post_json(&url, &headers, &self.request(prompt, text), &self.model)?;
        reply_text(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Engine;
    use serde_json::json;

    fn config() -> LlmConfig {
        LlmConfig {
            engine: Engine::OpenAi,
            ..LlmConfig::default()
        }
    }

    #[test]
    fn test_request_body() {
        let provider = OpenAiProvider::new(&config(), "sk-test").unwrap();
        let body = serde_json::to_value(provider.request("system text", "user text")).unwrap();

        assert_eq!(
            body,
            json!({
                "model": "gpt-4o-mini",
                "messages": [
                    { "role": "system", "content": "system text" },
                    { "role": "user", "content": "user text" }
                ]
            })
        );
    }

    #[test]
    fn test_reply_text() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "role": "assistant", "content": "p(a, b)." } }]
        }))
        .unwrap();
        assert_eq!(reply_text(response).unwrap(), "p(a, b).");
    }

    #[test]
    fn test_reply_without_content() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        }))
        .unwrap();
        assert!(matches!(reply_text(response), Err(LlmError::InvalidResponse(_))));

        let empty: ChatResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert!(reply_text(empty).is_err());
    }
}
