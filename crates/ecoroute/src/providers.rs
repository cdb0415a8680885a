// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds the provider registry from the `[[providers]]` table.
//!
//! Each entry's `backend` selects the adapter crate that serves it.

use std::sync::Arc;

use ecoroute_cascade::ProviderRegistry;
use ecoroute_config::model::{Backend, EcorouteConfig, ProviderConfig};
use ecoroute_core::{EcorouteError, ProviderAdapter};
use ecoroute_template::TemplateProvider;
use tracing::info;

/// Instantiates the adapter for one provider entry.
///
/// A backend whose feature was compiled out is a configuration error.
pub fn make_adapter(
    config: &EcorouteConfig,
    provider: &ProviderConfig,
) -> Result<Arc<dyn ProviderAdapter>, EcorouteError> {
    let adapter: Arc<dyn ProviderAdapter> = match provider.backend {
        Backend::Template => Arc::new(TemplateProvider::new(config, provider)),
        #[cfg(feature = "ollama")]
        Backend::Ollama => Arc::new(ecoroute_ollama::OllamaProvider::new(config, provider)?),
        #[cfg(feature = "huggingface")]
        Backend::Huggingface => Arc::new(ecoroute_huggingface::HuggingFaceProvider::new(
            config, provider,
        )?),
        #[cfg(feature = "anthropic")]
        Backend::Anthropic => {
            Arc::new(ecoroute_anthropic::AnthropicProvider::new(config, provider)?)
        }
        #[allow(unreachable_patterns)]
        other => {
            return Err(EcorouteError::Config(format!(
                "provider `{}` uses backend `{other:?}`, which is not compiled into this binary",
                provider.id
            )));
        }
    };
    Ok(adapter)
}

/// Builds the registry, cheapest tier first.
pub fn build_registry(config: &EcorouteConfig) -> Result<ProviderRegistry, EcorouteError> {
    let registry = ProviderRegistry::from_config(config, |p| make_adapter(config, p))?;
    info!(providers = registry.len(), "provider registry built");
    Ok(registry)
}
