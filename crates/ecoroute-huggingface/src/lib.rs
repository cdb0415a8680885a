// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hugging Face inference API provider adapter for ecoroute.
//!
//! Calls the hosted text-generation endpoint `POST {base_url}/models/{model}`.
//! Token resolution order: `huggingface.api_token` -> `HF_API_TOKEN` env var
//! -> anonymous (rate limited).

use std::time::Duration;

use async_trait::async_trait;
use ecoroute_config::model::{EcorouteConfig, ProviderConfig};
use ecoroute_core::error::EcorouteError;
use ecoroute_core::traits::{PluginAdapter, ProviderAdapter};
use ecoroute_core::types::HealthStatus;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Environment variable consulted when `huggingface.api_token` is unset.
pub const API_TOKEN_ENV: &str = "HF_API_TOKEN";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: String,
}

/// The API answers `[{"generated_text": ..}]`, though some deployments
/// return a bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batch(Vec<Generation>),
    Single(Generation),
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    #[serde(default)]
    estimated_time: Option<f64>,
}

/// Hugging Face provider implementing [`ProviderAdapter`].
#[derive(Debug, Clone)]
pub struct HuggingFaceProvider {
    id: String,
    model: String,
    endpoint: String,
    authenticated: bool,
    client: reqwest::Client,
}

impl HuggingFaceProvider {
    /// Creates a provider for one `[[providers]]` entry with `backend = "huggingface"`.
    pub fn new(config: &EcorouteConfig, provider: &ProviderConfig) -> Result<Self, EcorouteError> {
        let model = provider.model.as_deref().ok_or_else(|| {
            EcorouteError::Config(format!("provider `{}` has no model", provider.id))
        })?;
        let token = resolve_api_token(config.huggingface.api_token.as_deref());
        let this = Self::with_base_url(
            &provider.id,
            model,
            &config.huggingface.base_url,
            token.as_deref(),
        )?;
        info!(
            provider = provider.id,
            model,
            authenticated = this.authenticated,
            "Hugging Face provider initialized"
        );
        Ok(this)
    }

    /// Creates a provider pointed at an explicit API base URL.
    pub fn with_base_url(
        id: &str,
        model: &str,
        base_url: &str,
        token: Option<&str>,
    ) -> Result<Self, EcorouteError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                EcorouteError::Config(format!("invalid Hugging Face token header value: {e}"))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| EcorouteError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            id: id.to_string(),
            model: model.to_string(),
            endpoint: format!("{}/models/{model}", base_url.trim_end_matches('/')),
            authenticated: token.is_some(),
            client,
        })
    }
}

#[async_trait]
impl PluginAdapter for HuggingFaceProvider {
    fn name(&self) -> &str {
        &self.id
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, EcorouteError> {
        // Inference calls count against quota, so the probe stays local.
        Ok(if self.authenticated {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded(format!(
                "no API token: anonymous rate limits apply (set huggingface.api_token or {API_TOKEN_ENV})"
            ))
        })
    }
}

#[async_trait]
impl ProviderAdapter for HuggingFaceProvider {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, EcorouteError> {
        let request = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                max_new_tokens: max_tokens,
                return_full_text: false,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| EcorouteError::Transport {
                message: format!("Hugging Face request failed: {e}"),
                source: Box::new(e),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| EcorouteError::Transport {
            message: format!("failed to read Hugging Face response body: {e}"),
            source: Box::new(e),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(ErrorResponse {
                    error,
                    estimated_time: Some(eta),
                }) => format!("Hugging Face error ({status}): {error} (ready in ~{eta:.0}s)"),
                Ok(ErrorResponse { error, .. }) => format!("Hugging Face error ({status}): {error}"),
                Err(_) => format!("Hugging Face returned {status}: {body}"),
            };
            return Err(EcorouteError::Provider {
                message,
                source: None,
            });
        }

        let parsed: InferenceResponse =
            serde_json::from_str(&body).map_err(|e| EcorouteError::Provider {
                message: format!("failed to parse Hugging Face response: {e}"),
                source: Some(Box::new(e)),
            })?;

        let generated = match parsed {
            InferenceResponse::Batch(mut batch) if !batch.is_empty() => batch.swap_remove(0),
            InferenceResponse::Batch(_) => {
                return Err(EcorouteError::Provider {
                    message: "Hugging Face returned no generations".to_string(),
                    source: None,
                });
            }
            InferenceResponse::Single(generation) => generation,
        };
        debug!(provider = self.id, model = self.model, "Hugging Face completion received");

        // Some models ignore return_full_text and echo the prompt anyway.
        let text = generated.generated_text.trim();
        let text = text
            .strip_prefix(prompt.trim())
            .filter(|_| !prompt.trim().is_empty())
            .unwrap_or(text);
        Ok(text.trim().to_string())
    }
}

/// Resolves the token: non-empty config value first, then the environment.
fn resolve_api_token(config_token: Option<&str>) -> Option<String> {
    if let Some(token) = config_token
        && !token.is_empty()
    {
        return Some(token.to_string());
    }

    std::env::var(API_TOKEN_ENV).ok().filter(|t| !t.is_empty())
}
