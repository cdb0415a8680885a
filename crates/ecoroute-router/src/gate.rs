// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability gates: per-provider eligibility predicates.

use ecoroute_config::model::GateSpec;
use ecoroute_core::{Category, ProviderId};

use crate::prompt::PromptFeatures;

/// Eligibility rule for one provider. Mirrors [`GateSpec`] from config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityGate {
    /// Eligible while `token_count < below_tokens` and no `excluded` category matched.
    ShortQuery {
        below_tokens: usize,
        excluded: Vec<Category>,
    },
    /// Eligible while `token_count <= max_tokens` and no `excluded` category matched.
    General {
        max_tokens: usize,
        excluded: Vec<Category>,
    },
    /// Eligible when one of `categories` matched, or while `token_count <= max_tokens`.
    Specialist {
        categories: Vec<Category>,
        max_tokens: usize,
    },
    Always,
}

impl CapabilityGate {
    /// Whether a provider behind this gate may attempt the prompt.
    pub fn admits(&self, features: &PromptFeatures) -> bool {
        match self {
            CapabilityGate::ShortQuery {
                below_tokens,
                excluded,
            } => features.token_count < *below_tokens && !features.has_any(excluded),
            CapabilityGate::General {
                max_tokens,
                excluded,
            } => features.token_count <= *max_tokens && !features.has_any(excluded),
            CapabilityGate::Specialist {
                categories,
                max_tokens,
            } => features.has_any(categories) || features.token_count <= *max_tokens,
            CapabilityGate::Always => true,
        }
    }
}

impl From<&GateSpec> for CapabilityGate {
    fn from(spec: &GateSpec) -> Self {
        match spec {
            GateSpec::ShortQuery {
                below_tokens,
                excluded,
            } => CapabilityGate::ShortQuery {
                below_tokens: *below_tokens,
                excluded: excluded.clone(),
            },
            GateSpec::General {
                max_tokens,
                excluded,
            } => CapabilityGate::General {
                max_tokens: *max_tokens,
                excluded: excluded.clone(),
            },
            GateSpec::Specialist {
                categories,
                max_tokens,
            } => CapabilityGate::Specialist {
                categories: categories.clone(),
                max_tokens: *max_tokens,
            },
            GateSpec::Always => CapabilityGate::Always,
        }
    }
}

/// Ids of every provider whose gate admits the prompt, in table order.
///
/// Ids appearing twice in `tiers` are reported once.
pub fn eligible<'a, I>(tiers: I, features: &PromptFeatures) -> Vec<ProviderId>
where
    I: IntoIterator<Item = (&'a ProviderId, &'a CapabilityGate)>,
{
    let mut out: Vec<ProviderId> = Vec::new();
    for (id, gate) in tiers {
        if gate.admits(features) && !out.contains(id) {
            out.push(id.clone());
        }
    }
    out
}
