// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered provider registry.
//!
//! Built once at startup and shared read-only. Order is cost order,
//! cheapest first, and the last entry is always eligible.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use ecoroute_config::EcorouteConfig;
use ecoroute_config::model::ProviderConfig;
use ecoroute_core::{EcorouteError, ProviderAdapter, ProviderDescriptor, ProviderId};
use ecoroute_router::CapabilityGate;

/// One provider: what callers see, when it may answer, and how to call it.
#[derive(Clone)]
pub struct ProviderEntry {
    pub descriptor: ProviderDescriptor,
    pub gate: CapabilityGate,
    pub adapter: Arc<dyn ProviderAdapter>,
}

impl ProviderEntry {
    pub fn id(&self) -> &ProviderId {
        &self.descriptor.id
    }
}

impl fmt::Debug for ProviderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderEntry")
            .field("id", &self.descriptor.id)
            .field("gate", &self.gate)
            .field("adapter", &self.adapter.name())
            .finish()
    }
}

/// Descriptor for a `[[providers]]` entry.
pub fn descriptor_from_config(provider: &ProviderConfig) -> ProviderDescriptor {
    ProviderDescriptor {
        id: ProviderId::from(provider.id.as_str()),
        display_name: provider.display_name.clone(),
        description: provider.description.clone(),
        carbon_label: provider.carbon_label.clone(),
        energy_per_token_kwh: provider.energy_per_token_kwh,
    }
}

/// Provider table in cost order.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    entries: Vec<ProviderEntry>,
    descriptors: Vec<ProviderDescriptor>,
}

impl ProviderRegistry {
    /// Build a registry, checking the table invariants.
    ///
    /// Fails on an empty table, duplicate ids, or a last entry that is not
    /// always eligible.
    pub fn new(entries: Vec<ProviderEntry>) -> Result<Self, EcorouteError> {
        let Some(last) = entries.last() else {
            return Err(EcorouteError::Config(
                "provider registry must contain at least one provider".to_string(),
            ));
        };
        if last.gate != CapabilityGate::Always {
            return Err(EcorouteError::Config(format!(
                "last provider `{}` must be always eligible",
                last.id()
            )));
        }
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id().clone()) {
                return Err(EcorouteError::Config(format!(
                    "duplicate provider id `{}`",
                    entry.id()
                )));
            }
        }

        let descriptors = entries.iter().map(|e| e.descriptor.clone()).collect();
        Ok(Self {
            entries,
            descriptors,
        })
    }

    /// Build from `[[providers]]`, asking `make_adapter` for each backend.
    pub fn from_config<F>(config: &EcorouteConfig, mut make_adapter: F) -> Result<Self, EcorouteError>
    where
        F: FnMut(&ProviderConfig) -> Result<Arc<dyn ProviderAdapter>, EcorouteError>,
    {
        let entries = config
            .providers
            .iter()
            .map(|p| {
                Ok(ProviderEntry {
                    descriptor: descriptor_from_config(p),
                    gate: CapabilityGate::from(&p.gate),
                    adapter: make_adapter(p)?,
                })
            })
            .collect::<Result<Vec<_>, EcorouteError>>()?;
        Self::new(entries)
    }

    pub fn entries(&self) -> &[ProviderEntry] {
        &self.entries
    }

    pub fn descriptors(&self) -> &[ProviderDescriptor] {
        &self.descriptors
    }

    pub fn get(&self, id: &str) -> Option<&ProviderEntry> {
        self.entries.iter().find(|e| *e.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// `(id, gate)` pairs in table order.
    pub fn tiers(&self) -> Vec<(ProviderId, CapabilityGate)> {
        self.entries
            .iter()
            .map(|e| (e.id().clone(), e.gate.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
