// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Thin reqwest wrapper around `POST /v1/messages`.
//!
//! Handles authentication headers, the whole-request timeout, and retry of
//! transient status codes.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use shopwise_core::ShopwiseError;
use tracing::{debug, warn};

use crate::types::{ErrorEnvelope, MessageReply, MessageRequest};

/// Path appended to the configured base URL.
const MESSAGES_PATH: &str = "/v1/messages";

/// Delay before retrying a transient failure.
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Connection settings for [`AnthropicClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_key: String,
    pub api_version: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

/// Posts message requests with auth headers and retry.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
    max_retries: u32,
}

impl AnthropicClient {
    /// Creates a new client with authentication headers baked in.
    pub fn new(settings: ClientSettings) -> Result<Self, ShopwiseError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&settings.api_key)
                .map_err(|e| ShopwiseError::Config(format!("invalid API key header value: {e}")))?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_str(&settings.api_version).map_err(|e| {
                ShopwiseError::Config(format!("invalid API version header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ShopwiseError::Provider {
                message: format!("cannot construct HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}{MESSAGES_PATH}",
                settings.base_url.trim_end_matches('/')
            ),
            timeout: settings.timeout,
            max_retries: settings.max_retries,
        })
    }

    /// The full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends a request and returns the full response.
    ///
    /// Transient statuses (429, 500, 503, 529) are retried up to
    /// `max_retries` times after a 1-second delay.
    pub async fn complete_message(
        &self,
        request: &MessageRequest,
    ) -> Result<MessageReply, ShopwiseError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying message request");
                tokio::time::sleep(RETRY_DELAY).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .json(request)
                .send()
                .await
                .map_err(|e| self.request_error(e))?;

            let status = response.status();
            debug!(%status, attempt, "message endpoint answered");

            if status.is_success() {
                let body = response.text().await.map_err(|e| self.request_error(e))?;
                return serde_json::from_str(&body).map_err(|e| ShopwiseError::Provider {
                    message: format!("unreadable reply body: {e}"),
                    source: Some(Box::new(e)),
                });
            }

            let body = response.text().await.unwrap_or_default();
            if is_transient_error(status) && attempt < self.max_retries {
                warn!(%status, %body, "transient provider failure");
                last_error = Some(ShopwiseError::Provider {
                    message: format!("API returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Permanent failure, or the last allowed attempt.
            let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(api_err) => format!(
                    "provider rejected request ({}): {}",
                    api_err.error.kind, api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(ShopwiseError::Provider {
                message,
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| ShopwiseError::Provider {
            message: "message request exhausted its retries".into(),
            source: None,
        }))
    }

    /// Timeouts keep their own variant; every other transport failure is a
    /// provider error.
    fn request_error(&self, e: reqwest::Error) -> ShopwiseError {
        if e.is_timeout() {
            return ShopwiseError::Timeout {
                duration: self.timeout,
            };
        }
        ShopwiseError::Provider {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        }
    }
}

/// 429, 500, 503 and 529 are retried; every other status fails at once.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503 | 529)
}
