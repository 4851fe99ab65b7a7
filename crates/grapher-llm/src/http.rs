//! Shared JSON-over-HTTP plumbing for the remote providers

use crate::LlmError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, warn};

/// A reqwest client plus the runtime that drives it from synchronous code
#[derive(Debug)]
pub(crate) struct HttpClient {
    client: reqwest::Client,
    runtime: Runtime,
    max_retries: u32,
}

impl HttpClient {
    pub(crate) fn new(timeout: Duration, max_retries: u32) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?;

        Ok(Self {
            client,
            runtime,
            max_retries: max_retries.max(1),
        })
    }

    /// POST `body` as JSON and decode the JSON reply, blocking the caller
    pub(crate) fn post_json<B, R>(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        body: &B,
        model: &str,
    ) -> Result<R, LlmError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        self.runtime
            .block_on(self.post_json_async(url, headers, body, model))
    }

    async fn post_json_async<B, R>(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        body: &B,
        model: &str,
    ) -> Result<R, LlmError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        // Retry logic with exponential backoff
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            let mut request = self.client.post(url).json(body);
            for (name, value) in headers {
                request = request.header(*name, value.as_str());
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.json::<R>().await.map_err(|e| {
                            LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                        });
                    }

                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    match status {
                        reqwest::StatusCode::NOT_FOUND => {
                            return Err(LlmError::ModelNotAvailable(model.to_string()));
                        }
                        reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                            return Err(LlmError::Authentication(format!(
                                "HTTP {}: {}",
                                status, error_text
                            )));
                        }
                        reqwest::StatusCode::TOO_MANY_REQUESTS => {
                            last_error = Some(LlmError::RateLimitExceeded);
                        }
                        _ => {
                            last_error = Some(LlmError::Communication(format!(
                                "HTTP {}: {}",
                                status, error_text
                            )));
                        }
                    }
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                warn!(url, attempt = attempts, ?delay, "request failed, retrying");
                tokio::time::sleep(delay).await;
            }
        }

        debug!(url, attempts, "giving up");
        Err(last_error.unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}
