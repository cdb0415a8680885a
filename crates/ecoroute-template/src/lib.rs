// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned-answer provider for ecoroute.
//!
//! The cheapest tier of the default table: no model, no network. It answers
//! a handful of common sustainability questions from a fixed table and
//! declines everything else so the cascade moves on.

pub mod answers;

use async_trait::async_trait;
use ecoroute_config::model::{EcorouteConfig, ProviderConfig};
use ecoroute_core::error::EcorouteError;
use ecoroute_core::traits::{PluginAdapter, ProviderAdapter};
use ecoroute_core::types::HealthStatus;
use tracing::debug;

/// Canned-answer provider implementing [`ProviderAdapter`].
#[derive(Debug, Clone)]
pub struct TemplateProvider {
    id: String,
    generic_answer: bool,
}

impl TemplateProvider {
    /// Creates a provider for one `[[providers]]` entry with `backend = "template"`.
    pub fn new(config: &EcorouteConfig, provider: &ProviderConfig) -> Self {
        Self::with_generic_answer(&provider.id, config.template.generic_answer)
    }

    /// Creates a provider. With `generic_answer`, unmatched prompts get a
    /// generic reply instead of a decline.
    pub fn with_generic_answer(id: &str, generic_answer: bool) -> Self {
        Self {
            id: id.to_string(),
            generic_answer,
        }
    }
}

#[async_trait]
impl PluginAdapter for TemplateProvider {
    fn name(&self) -> &str {
        &self.id
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, EcorouteError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ProviderAdapter for TemplateProvider {
    async fn generate(&self, prompt: &str, _max_tokens: u32) -> Result<String, EcorouteError> {
        if let Some(answer) = answers::lookup(prompt) {
            return Ok(answer.to_string());
        }
        if self.generic_answer {
            return Ok(answers::generic_answer(prompt.trim()));
        }
        debug!(provider = self.id, "no canned answer for prompt");
        Err(EcorouteError::NoAnswer {
            provider: self.id.clone(),
        })
    }
}
