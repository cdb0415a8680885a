// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Claude provider adapter for ecoroute.
//!
//! This crate implements [`ProviderAdapter`] for the Anthropic Messages API.
//! It usually backs the top, always-eligible tier of the provider table.

pub mod client;
pub mod types;

use async_trait::async_trait;
use ecoroute_config::model::{EcorouteConfig, ProviderConfig};
use ecoroute_core::error::EcorouteError;
use ecoroute_core::traits::{PluginAdapter, ProviderAdapter};
use ecoroute_core::types::HealthStatus;
use tracing::{debug, info, warn};

use crate::client::AnthropicClient;
use crate::types::MessageRequest;

/// Environment variable consulted when `anthropic.api_key` is unset.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Anthropic Claude provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config -> `ANTHROPIC_API_KEY` env var. A
/// provider without a key still registers; it reports itself unhealthy and
/// every call fails, so the cascade moves on.
#[derive(Debug)]
pub struct AnthropicProvider {
    id: String,
    model: String,
    client: Option<AnthropicClient>,
}

impl AnthropicProvider {
    /// Creates a provider for one `[[providers]]` entry with `backend = "anthropic"`.
    pub fn new(config: &EcorouteConfig, provider: &ProviderConfig) -> Result<Self, EcorouteError> {
        let model = provider.model.clone().ok_or_else(|| {
            EcorouteError::Config(format!("provider `{}` has no model", provider.id))
        })?;

        let client = match resolve_api_key(config.anthropic.api_key.as_deref()) {
            Some(key) => Some(AnthropicClient::new(&key, &config.anthropic.api_version)?),
            None => {
                warn!(
                    provider = provider.id,
                    "no Anthropic API key configured; provider will fail every call"
                );
                None
            }
        };

        info!(provider = provider.id, model, "Anthropic provider initialized");

        Ok(Self {
            id: provider.id.clone(),
            model,
            client,
        })
    }

    /// Creates a provider with an existing client (for testing).
    pub fn with_client(id: &str, model: &str, client: Option<AnthropicClient>) -> Self {
        Self {
            id: id.to_string(),
            model: model.to_string(),
            client,
        }
    }
}

#[async_trait]
impl PluginAdapter for AnthropicProvider {
    fn name(&self) -> &str {
        &self.id
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, EcorouteError> {
        // No API call here: a health probe should not consume tokens.
        Ok(match self.client {
            Some(_) => HealthStatus::Healthy,
            None => HealthStatus::Unhealthy(format!(
                "no API key: set anthropic.api_key or {API_KEY_ENV}"
            )),
        })
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicProvider {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, EcorouteError> {
        let Some(client) = &self.client else {
            return Err(EcorouteError::Provider {
                message: format!("Anthropic API key not configured for `{}`", self.id),
                source: None,
            });
        };

        let request = MessageRequest::user_prompt(&self.model, prompt, max_tokens);
        let response = client.complete_message(&request).await?;
        debug!(
            provider = self.id,
            output_tokens = response.usage.output_tokens,
            stop_reason = response.stop_reason.as_deref().unwrap_or("unknown"),
            "Anthropic completion received"
        );

        Ok(response.text().trim().to_string())
    }
}

/// Resolves the API key: non-empty config value first, then the environment.
fn resolve_api_key(config_key: Option<&str>) -> Option<String> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Some(key.to_string());
    }

    std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> AnthropicProvider {
        let client = AnthropicClient::new("test-key", "2023-06-01")
            .unwrap()
            .with_base_url(server.uri());
        AnthropicProvider::with_client("claude", "claude-3-haiku-20240307", Some(client))
    }

    #[test]
    fn resolve_api_key_from_config() {
        assert_eq!(resolve_api_key(Some("sk-test-123")).as_deref(), Some("sk-test-123"));
    }

    #[test]
    fn resolve_api_key_empty_config_falls_back_to_env() {
        // Only checks that the empty string is never returned; the env may or may not be set.
        if let Some(key) = resolve_api_key(Some("")) {
            assert!(!key.is_empty());
        }
    }

    #[test]
    fn new_requires_model() {
        let config = EcorouteConfig::default();
        let mut provider = config.provider("claude").unwrap().clone();
        provider.model = None;
        let err = AnthropicProvider::new(&config, &provider).unwrap_err();
        assert!(err.to_string().contains("has no model"));
    }

    #[test]
    fn new_accepts_configured_key() {
        let mut config = EcorouteConfig::default();
        config.anthropic.api_key = Some("sk-ant-config".into());
        let entry = config.provider("claude").unwrap().clone();
        let provider = AnthropicProvider::new(&config, &entry).unwrap();
        assert_eq!(provider.name(), "claude");
        assert!(!format!("{provider:?}").contains("sk-ant-config"));
    }

    #[tokio::test]
    async fn generate_returns_concatenated_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "messages": [{"role": "user", "content": "What is wind power?"}],
                "max_tokens": 100
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg_1",
                "type": "message",
                "role": "assistant",
                "content": [
                    {"type": "text", "text": "Wind power turns moving air "},
                    {"type": "text", "text": "into electricity.\n"}
                ],
                "model": "claude-3-haiku-20240307",
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 5, "output_tokens": 9}
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let text = provider.generate("What is wind power?", 100).await.unwrap();
        assert_eq!(text, "Wind power turns moving air into electricity.");
    }

    #[tokio::test]
    async fn generate_surfaces_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "type": "error",
                "error": {"type": "authentication_error", "message": "invalid x-api-key"}
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider.generate("hello", 100).await.unwrap_err();
        assert!(matches!(err, EcorouteError::Provider { .. }));
        assert!(err.to_string().contains("authentication_error"));
    }

    #[tokio::test]
    async fn keyless_provider_is_unhealthy_and_fails() {
        let provider = AnthropicProvider::with_client("claude", "claude-3-haiku-20240307", None);
        let health = provider.health_check().await.unwrap();
        assert!(matches!(health, HealthStatus::Unhealthy(_)));
        let err = provider.generate("hello", 100).await.unwrap_err();
        assert!(err.to_string().contains("not configured"));
    }
}
