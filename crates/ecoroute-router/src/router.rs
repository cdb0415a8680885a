// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tier routing: gates, scoring and band selection over the provider table.
//!
//! Produces the ordered cascade for automatic routing and the advisory
//! suggestion. Never calls a provider.

use ecoroute_config::EcorouteConfig;
use ecoroute_core::{ProviderId, Suggestion};
use tracing::debug;

use crate::gate::{self, CapabilityGate};
use crate::prompt::{Prompt, PromptFeatures};
use crate::scorer::{ComplexityScorer, ScoreReport};
use crate::selector::TierSelector;

/// Provider table in cost order, each id with its gate.
#[derive(Debug, Clone)]
pub struct TierRouter {
    tiers: Vec<(ProviderId, CapabilityGate)>,
    order: Vec<ProviderId>,
    scorer: ComplexityScorer,
    selector: TierSelector,
}

impl TierRouter {
    pub fn new(tiers: Vec<(ProviderId, CapabilityGate)>, selector: TierSelector) -> Self {
        let order = tiers.iter().map(|(id, _)| id.clone()).collect();
        Self {
            tiers,
            order,
            scorer: ComplexityScorer::new(),
            selector,
        }
    }

    /// Build from the `[[providers]]` table and `[[routing.bands]]`.
    pub fn from_config(config: &EcorouteConfig) -> Self {
        let tiers = config
            .providers
            .iter()
            .map(|p| (ProviderId::from(p.id.as_str()), CapabilityGate::from(&p.gate)))
            .collect();
        Self::new(tiers, TierSelector::from_config(&config.routing.bands))
    }

    /// Provider ids, cheapest first.
    pub fn order(&self) -> &[ProviderId] {
        &self.order
    }

    pub fn gate(&self, id: &str) -> Option<&CapabilityGate> {
        self.tiers.iter().find(|(p, _)| *p == id).map(|(_, g)| g)
    }

    /// Classify and score a prompt.
    pub fn analyze(&self, prompt: &Prompt) -> ScoreReport {
        self.scorer.report(prompt)
    }

    /// Gate-eligible provider ids for the prompt, cheapest first, without duplicates.
    pub fn eligible(&self, features: &PromptFeatures) -> Vec<ProviderId> {
        gate::eligible(self.tiers.iter().map(|(id, g)| (id, g)), features)
    }

    /// Advisory suggestion for a prompt.
    pub fn suggest(&self, prompt: &Prompt) -> Suggestion {
        let features = prompt.features();
        let score = self.scorer.score(&features);
        let eligible = self.eligible(&features);
        let suggestion = self.selector.select(score, &self.order, &eligible);
        debug!(
            score,
            tokens = features.token_count,
            suggested = %suggestion.suggested_provider,
            "tier suggestion"
        );
        suggestion
    }
}
