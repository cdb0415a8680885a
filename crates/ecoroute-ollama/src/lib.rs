// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama provider adapter for ecoroute.
//!
//! Talks to a local Ollama server through its native `/api/generate`
//! endpoint. Small local models are the low-impact general tier of the
//! default provider table.

pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use ecoroute_config::model::{EcorouteConfig, ProviderConfig};
use ecoroute_core::error::EcorouteError;
use ecoroute_core::traits::{PluginAdapter, ProviderAdapter};
use ecoroute_core::types::HealthStatus;
use tracing::{debug, info};

use crate::types::{ErrorResponse, GenerateOptions, GenerateRequest, GenerateResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const HEALTH_TIMEOUT: Duration = Duration::from_secs(2);

/// Ollama provider implementing [`ProviderAdapter`].
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    id: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    /// Creates a provider for one `[[providers]]` entry with `backend = "ollama"`.
    pub fn new(config: &EcorouteConfig, provider: &ProviderConfig) -> Result<Self, EcorouteError> {
        let model = provider.model.as_deref().ok_or_else(|| {
            EcorouteError::Config(format!("provider `{}` has no model", provider.id))
        })?;
        let this = Self::with_base_url(&provider.id, model, &config.ollama.base_url)?;
        info!(provider = provider.id, model, base_url = this.base_url, "Ollama provider initialized");
        Ok(this)
    }

    /// Creates a provider pointed at an explicit server URL.
    pub fn with_base_url(id: &str, model: &str, base_url: &str) -> Result<Self, EcorouteError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| EcorouteError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            id: id.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl PluginAdapter for OllamaProvider {
    fn name(&self) -> &str {
        &self.id
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, EcorouteError> {
        // Listing local models is cheap and proves the server is up.
        let url = format!("{}/api/tags", self.base_url);
        let status = match self.client.get(&url).timeout(HEALTH_TIMEOUT).send().await {
            Ok(resp) if resp.status().is_success() => HealthStatus::Healthy,
            Ok(resp) => HealthStatus::Degraded(format!("Ollama returned {}", resp.status())),
            Err(e) => HealthStatus::Unhealthy(format!("Ollama unreachable at {}: {e}", self.base_url)),
        };
        Ok(status)
    }
}

#[async_trait]
impl ProviderAdapter for OllamaProvider {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, EcorouteError> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: GenerateOptions {
                num_predict: max_tokens,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| EcorouteError::Transport {
                message: format!("Ollama request failed: {e}"),
                source: Box::new(e),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| EcorouteError::Transport {
            message: format!("failed to read Ollama response body: {e}"),
            source: Box::new(e),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => format!("Ollama error ({status}): {}", err.error),
                Err(_) => format!("Ollama returned {status}: {body}"),
            };
            return Err(EcorouteError::Provider {
                message,
                source: None,
            });
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| EcorouteError::Provider {
                message: format!("failed to parse Ollama response: {e}"),
                source: Some(Box::new(e)),
            })?;
        debug!(
            provider = self.id,
            model = parsed.model,
            eval_count = parsed.eval_count,
            "Ollama completion received"
        );

        Ok(strip_echoed_prompt(prompt, &parsed.response))
    }
}

/// Removes the prompt when a model repeats it at the start of its output.
pub fn strip_echoed_prompt(prompt: &str, output: &str) -> String {
    let prompt = prompt.trim();
    let output = output.trim();
    match output.strip_prefix(prompt) {
        Some(rest) if !prompt.is_empty() => rest.trim().to_string(),
        _ => output.to_string(),
    }
}
