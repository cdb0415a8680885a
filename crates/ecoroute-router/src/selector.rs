// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Score bands to advisory tier suggestions.
//!
//! Bands ascend in impact. When a band names a provider the gates rule out,
//! the suggestion moves up the provider table to the next eligible entry.
//! Nothing here calls a provider.

use ecoroute_config::model::BandConfig;
use ecoroute_core::{ProviderId, Suggestion};
use tracing::debug;

const FALLBACK_CONFIDENCE: &str = "low";
const FALLBACK_REASON: &str = "Next eligible provider for this query";
const FALLBACK_SAVINGS: &str = "unknown";

/// One score band with its static labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Band {
    /// Inclusive upper bound; `None` on the open-ended last band.
    pub max_score: Option<u32>,
    pub provider: ProviderId,
    pub confidence: String,
    pub reason: String,
    pub carbon_savings: String,
}

impl Band {
    fn covers(&self, score: u32) -> bool {
        self.max_score.is_none_or(|max| score <= max)
    }
}

impl From<&BandConfig> for Band {
    fn from(band: &BandConfig) -> Self {
        Self {
            max_score: band.max_score,
            provider: ProviderId::from(band.provider.as_str()),
            confidence: band.confidence.clone(),
            reason: band.reason.clone(),
            carbon_savings: band.carbon_savings.clone(),
        }
    }
}

/// Maps a complexity score to a suggested provider.
#[derive(Debug, Clone)]
pub struct TierSelector {
    bands: Vec<Band>,
}

impl TierSelector {
    pub fn new(bands: Vec<Band>) -> Self {
        Self { bands }
    }

    pub fn from_config(bands: &[BandConfig]) -> Self {
        Self::new(bands.iter().map(Band::from).collect())
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Index of the band covering `score`. Scores past a closed last band use the last band.
    fn band_index(&self, score: u32) -> usize {
        self.bands
            .iter()
            .position(|b| b.covers(score))
            .unwrap_or(self.bands.len().saturating_sub(1))
    }

    /// Suggest a provider for `score`.
    ///
    /// `order` is the full provider table, cheapest first; `eligible` is the
    /// subset whose gates admit the prompt.
    pub fn select(&self, score: u32, order: &[ProviderId], eligible: &[ProviderId]) -> Suggestion {
        let index = self.band_index(score);
        let Some(band) = self.bands.get(index) else {
            return self.fallback(score, order.last().or(eligible.last()));
        };

        if eligible.contains(&band.provider) {
            return suggestion(band, &band.provider, score);
        }

        let start = order.iter().position(|id| *id == band.provider).unwrap_or(0);
        let chosen = order[start..]
            .iter()
            .find(|id| eligible.contains(id))
            .or(eligible.last());

        let Some(chosen) = chosen else {
            return suggestion(band, &band.provider, score);
        };

        debug!(
            band_provider = %band.provider,
            chosen = %chosen,
            score,
            "band provider not eligible, moving up the table"
        );

        let labels = self.bands[index..]
            .iter()
            .find(|b| b.provider == *chosen)
            .or_else(|| self.bands.iter().find(|b| b.provider == *chosen));

        match labels {
            Some(labels) => suggestion(labels, chosen, score),
            None => self.fallback(score, Some(chosen)),
        }
    }

    fn fallback(&self, score: u32, provider: Option<&ProviderId>) -> Suggestion {
        Suggestion {
            suggested_provider: provider.cloned().unwrap_or_else(|| ProviderId::from("none")),
            confidence_label: FALLBACK_CONFIDENCE.to_string(),
            reason_text: FALLBACK_REASON.to_string(),
            carbon_savings_label: FALLBACK_SAVINGS.to_string(),
            complexity_score: score,
        }
    }
}

fn suggestion(labels: &Band, provider: &ProviderId, score: u32) -> Suggestion {
    Suggestion {
        suggested_provider: provider.clone(),
        confidence_label: labels.confidence.clone(),
        reason_text: labels.reason.clone(),
        carbon_savings_label: labels.carbon_savings.clone(),
        complexity_score: score,
    }
}
