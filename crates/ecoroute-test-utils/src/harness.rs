// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end routing tests.
//!
//! `TestHarness` builds an `EcoRouter` over a provider table with every
//! adapter replaced by a [`MockProvider`]. Providers without an explicit
//! mock get a default one that always answers.

use std::collections::HashMap;
use std::sync::Arc;

use ecoroute_cascade::{EcoRouter, ProviderRegistry};
use ecoroute_config::EcorouteConfig;
use ecoroute_core::{EcorouteError, ProviderAdapter};

use crate::mock_provider::MockProvider;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    config: EcorouteConfig,
    mocks: HashMap<String, MockProvider>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            config: EcorouteConfig::default(),
            mocks: HashMap::new(),
        }
    }

    /// Replace the default configuration.
    pub fn with_config(mut self, config: EcorouteConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `mock` for the provider with id `id`.
    pub fn with_mock(mut self, id: &str, mock: MockProvider) -> Self {
        self.mocks.insert(id.to_string(), mock);
        self
    }

    /// Build the engine. Fails when the provider table is invalid.
    pub fn build(mut self) -> Result<TestHarness, EcorouteError> {
        for provider in &self.config.providers {
            self.mocks
                .entry(provider.id.clone())
                .or_insert_with(|| MockProvider::new(&provider.id));
        }

        let mocks = self.mocks;
        let registry = ProviderRegistry::from_config(&self.config, |p| {
            mocks
                .get(&p.id)
                .cloned()
                .map(|m| Arc::new(m) as Arc<dyn ProviderAdapter>)
                .ok_or_else(|| EcorouteError::Internal(format!("no mock for `{}`", p.id)))
        })?;
        let router = Arc::new(EcoRouter::from_config(&self.config, registry));

        Ok(TestHarness {
            router,
            mocks,
            config: self.config,
        })
    }
}

/// A complete routing engine backed by mock providers.
pub struct TestHarness {
    /// The engine under test.
    pub router: Arc<EcoRouter>,
    mocks: HashMap<String, MockProvider>,
    /// Configuration the engine was built from.
    pub config: EcorouteConfig,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Harness over the default table where every provider answers.
    pub fn with_defaults() -> Result<Self, EcorouteError> {
        Self::builder().build()
    }

    /// The mock serving provider `id`. Clones share call counts with the engine's copy.
    pub fn mock(&self, id: &str) -> Option<&MockProvider> {
        self.mocks.get(id)
    }

    /// Total `generate` calls across every mock.
    pub fn total_calls(&self) -> usize {
        self.mocks.values().map(MockProvider::calls).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoroute_core::{FailureKind, TextResult};

    #[tokio::test]
    async fn default_harness_answers_from_cheapest_tier() {
        let harness = TestHarness::with_defaults().unwrap();
        let result = harness.router.route("What is wind power?", None).await.unwrap();
        assert_eq!(result.model_used, "simple");
        assert_eq!(harness.mock("simple").unwrap().calls(), 1);
        assert_eq!(harness.total_calls(), 1);
    }

    #[tokio::test]
    async fn explicit_mock_replaces_default() {
        let harness = TestHarness::builder()
            .with_mock("simple", MockProvider::failing("simple", FailureKind::NoAnswer))
            .with_mock(
                "tinyllama",
                MockProvider::scripted(
                    "tinyllama",
                    vec![TextResult::Success("Wind turbines turn moving air into power.".into())],
                ),
            )
            .build()
            .unwrap();
        let result = harness.router.route("What is wind power?", None).await.unwrap();
        assert_eq!(result.model_used, "tinyllama");
        assert_eq!(result.attempts.len(), 2);
    }

    #[test]
    fn invalid_table_fails_to_build() {
        let mut config = EcorouteConfig::default();
        config.providers.pop();
        assert!(TestHarness::builder().with_config(config).build().is_err());
    }
}
