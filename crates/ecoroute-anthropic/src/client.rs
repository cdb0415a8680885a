// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Anthropic Messages API.
//!
//! Provides [`AnthropicClient`] which handles request construction,
//! authentication, and transient error retry.

use std::time::Duration;

use ecoroute_core::EcorouteError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, MessageRequest, MessageResponse};

/// Base URL for the Anthropic Messages API.
const API_BASE_URL: &str = "https://api.anthropic.com/v1/messages";

/// Upper bound for a single HTTP exchange. The cascade applies its own,
/// usually shorter, per-call deadline on top of this.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client for Anthropic API communication.
///
/// Manages authentication headers, connection pooling, and retry logic
/// for transient errors (429, 500, 503, 529).
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    max_retries: u32,
    base_url: String,
}

impl AnthropicClient {
    /// Creates a new Anthropic API client.
    ///
    /// The key header is marked sensitive so it never shows up in `Debug` output.
    pub fn new(api_key: &str, api_version: &str) -> Result<Self, EcorouteError> {
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| EcorouteError::Config(format!("invalid API key header value: {e}")))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", key);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_str(api_version).map_err(|e| {
                EcorouteError::Config(format!("invalid API version header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| EcorouteError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            max_retries: 1,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the endpoint URL (for testing with wiremock).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sends a request and returns the full response.
    ///
    /// On transient errors, retries once after a 1-second delay. A failure
    /// to reach the server is a transport error; any non-success status is a
    /// provider error.
    pub async fn complete_message(
        &self,
        request: &MessageRequest,
    ) -> Result<MessageResponse, EcorouteError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying completion request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&self.base_url)
                .json(request)
                .send()
                .await
                .map_err(|e| EcorouteError::Transport {
                    message: format!("HTTP request failed: {e}"),
                    source: Box::new(e),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "completion response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| EcorouteError::Transport {
                    message: format!("failed to read response body: {e}"),
                    source: Box::new(e),
                })?;
                return serde_json::from_str(&body).map_err(|e| EcorouteError::Provider {
                    message: format!("failed to parse API response: {e}"),
                    source: Some(Box::new(e)),
                });
            }

            let body = response.text().await.unwrap_or_default();

            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(EcorouteError::Provider {
                    message: format!("API returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "Anthropic API error ({}): {}",
                    api_err.error.type_, api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(EcorouteError::Provider {
                message,
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| EcorouteError::Provider {
            message: "completion request failed after retries".into(),
            source: None,
        }))
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503 | 529)
}
