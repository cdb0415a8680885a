// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Energy coefficient table and carbon calculation.
//!
//! Default coefficients (kWh per token):
//!
//! simple:      0.0000001
//! tinyllama:   0.0000005
//! huggingface: 0.0000001
//! claude:      0.000002
//!
//! Grid intensity defaults to 0.4 kg CO2 per kWh.

use std::collections::HashMap;

use ecoroute_config::EcorouteConfig;
use ecoroute_core::ProviderDescriptor;
use tracing::debug;

/// Decimal places kept in reported grams.
const PRECISION: i32 = 6;

/// Converts (provider, tokens) into grams of CO2.
#[derive(Debug, Clone)]
pub struct CarbonEstimator {
    energy_per_token_kwh: HashMap<String, f64>,
    default_energy_per_token_kwh: f64,
    grid_intensity_kg_per_kwh: f64,
}

impl CarbonEstimator {
    pub fn new(grid_intensity_kg_per_kwh: f64, default_energy_per_token_kwh: f64) -> Self {
        Self {
            energy_per_token_kwh: HashMap::new(),
            default_energy_per_token_kwh,
            grid_intensity_kg_per_kwh,
        }
    }

    /// Build from `[carbon]` and the coefficients in `[[providers]]`.
    pub fn from_config(config: &EcorouteConfig) -> Self {
        let mut estimator = Self::new(
            config.carbon.grid_intensity_kg_per_kwh,
            config.carbon.default_energy_per_token_kwh,
        );
        for provider in &config.providers {
            estimator = estimator.with_provider(&provider.id, provider.energy_per_token_kwh);
        }
        estimator
    }

    /// Build from registry descriptors.
    pub fn from_descriptors(
        descriptors: &[ProviderDescriptor],
        grid_intensity_kg_per_kwh: f64,
        default_energy_per_token_kwh: f64,
    ) -> Self {
        descriptors.iter().fold(
            Self::new(grid_intensity_kg_per_kwh, default_energy_per_token_kwh),
            |est, d| est.with_provider(d.id.as_str(), d.energy_per_token_kwh),
        )
    }

    pub fn with_provider(mut self, id: &str, energy_per_token_kwh: f64) -> Self {
        self.energy_per_token_kwh
            .insert(id.to_string(), energy_per_token_kwh);
        self
    }

    /// Coefficient for `provider`. Unknown ids use the default coefficient.
    pub fn energy_per_token(&self, provider: &str) -> f64 {
        match self.energy_per_token_kwh.get(provider) {
            Some(e) => *e,
            None => {
                debug!(provider, "no energy coefficient, using default");
                self.default_energy_per_token_kwh
            }
        }
    }

    /// Estimated grams of CO2, rounded to six decimal places. Never fails.
    ///
    /// `energy_per_token * grid_intensity * 1000 * tokens`
    pub fn estimate(&self, provider: &str, tokens: usize) -> f64 {
        let grams_per_token =
            self.energy_per_token(provider) * self.grid_intensity_kg_per_kwh * 1000.0;
        round_to(grams_per_token * tokens as f64, PRECISION)
    }
}

impl Default for CarbonEstimator {
    fn default() -> Self {
        Self::from_config(&EcorouteConfig::default())
    }
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
