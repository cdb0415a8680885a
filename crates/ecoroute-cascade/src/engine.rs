// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The routing engine: one immutable registry behind the boundary operations.

use std::sync::Arc;

use ecoroute_carbon::CarbonEstimator;
use ecoroute_config::EcorouteConfig;
use ecoroute_core::{
    EcorouteError, HealthStatus, ProviderDescriptor, ProviderId, QueryResult,
    RoutingMode, Suggestion,
};
use ecoroute_router::{Prompt, ScoreReport, TierRouter, TierSelector};
use futures::future::join_all;
use tracing::{info, warn};

use crate::cascade::{Cascade, CascadeSettings};
use crate::quality::QualityFilter;
use crate::registry::ProviderRegistry;

/// Response text when every provider failed or was rejected.
pub const EXHAUSTED_MESSAGE: &str =
    "Sorry, none of the available models could generate a response.";

/// `model_used` when no provider answered.
pub const NO_MODEL: &str = "none";

/// Carbon-aware prompt router.
///
/// Cheap to share: wrap in an `Arc` and call from any number of tasks.
#[derive(Debug)]
pub struct EcoRouter {
    registry: Arc<ProviderRegistry>,
    router: TierRouter,
    cascade: Cascade,
    carbon: CarbonEstimator,
}

impl EcoRouter {
    pub fn new(
        registry: ProviderRegistry,
        selector: TierSelector,
        cascade: Cascade,
        carbon: CarbonEstimator,
    ) -> Self {
        let router = TierRouter::new(registry.tiers(), selector);
        Self {
            registry: Arc::new(registry),
            router,
            cascade,
            carbon,
        }
    }

    /// Assemble the engine from config around an already-built registry.
    pub fn from_config(config: &EcorouteConfig, registry: ProviderRegistry) -> Self {
        let carbon = CarbonEstimator::from_descriptors(
            registry.descriptors(),
            config.carbon.grid_intensity_kg_per_kwh,
            config.carbon.default_energy_per_token_kwh,
        );
        Self::new(
            registry,
            TierSelector::from_config(&config.routing.bands),
            Cascade::new(
                QualityFilter::from_config(&config.quality),
                CascadeSettings::from_config(&config.routing),
            ),
            carbon,
        )
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Categories, token count and complexity score. No provider is called.
    pub fn classify_and_score(&self, raw: &str) -> Result<ScoreReport, EcorouteError> {
        let prompt = Prompt::new(raw)?;
        Ok(self.router.analyze(&prompt))
    }

    /// Advisory tier suggestion. No provider is called.
    pub fn suggest_tier(&self, raw: &str) -> Result<Suggestion, EcorouteError> {
        let prompt = Prompt::new(raw)?;
        Ok(self.router.suggest(&prompt))
    }

    /// Route a prompt through the cascade.
    ///
    /// With `forced`, exactly that provider is tried and its gate is not
    /// consulted. An unknown forced id tries nothing and yields the
    /// exhausted result. Provider failures never surface as errors.
    pub async fn route(
        &self,
        raw: &str,
        forced: Option<&str>,
    ) -> Result<QueryResult, EcorouteError> {
        let prompt = Prompt::new(raw)?;

        let (routing, candidates) = match forced {
            Some(id) if self.registry.contains(id) => {
                (RoutingMode::Forced, vec![ProviderId::from(id)])
            }
            Some(id) => {
                warn!(provider = id, "forced provider is not registered");
                (RoutingMode::Forced, Vec::new())
            }
            None => (RoutingMode::Auto, self.router.eligible(&prompt.features())),
        };

        info!(
            routing = %routing,
            tokens = prompt.token_count(),
            candidates = candidates.len(),
            "routing query"
        );

        let outcome = self.cascade.run(&self.registry, &prompt, &candidates).await;
        let tokens_used = prompt.token_count();

        let (response, model_used, carbon_grams) = match outcome.accepted {
            Some(answer) => {
                let grams = self.carbon.estimate(answer.provider.as_str(), tokens_used);
                (answer.text, answer.provider.to_string(), grams)
            }
            None => (EXHAUSTED_MESSAGE.to_string(), NO_MODEL.to_string(), 0.0),
        };

        ecoroute_prometheus::record_query(&model_used);
        ecoroute_prometheus::record_carbon(carbon_grams);

        Ok(QueryResult {
            prompt: raw.to_string(),
            response,
            model_used,
            tokens_used,
            carbon_grams,
            routing,
            attempts: outcome.attempts,
        })
    }

    /// Provider descriptors, cheapest first.
    pub fn list_providers(&self) -> &[ProviderDescriptor] {
        self.registry.descriptors()
    }

    /// Health of every provider, in table order. A failing check reports unhealthy.
    pub async fn provider_health(&self) -> Vec<(ProviderId, HealthStatus)> {
        let checks = self.registry.entries().iter().map(|entry| async move {
            let status = match entry.adapter.health_check().await {
                Ok(status) => status,
                Err(e) => HealthStatus::Unhealthy(e.to_string()),
            };
            (entry.id().clone(), status)
        });
        join_all(checks).await
    }
}
