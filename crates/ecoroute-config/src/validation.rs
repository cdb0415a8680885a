// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes:
//! the provider table must end with an always-eligible tier, ids must be unique,
//! suggestion bands must ascend and name known providers.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::{Backend, EcorouteConfig, GateSpec};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &EcorouteConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.server.log_level.as_str()) {
        errors.push(invalid(format!(
            "server.log_level `{}` must be one of {}",
            config.server.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(invalid("gateway.host must not be empty".to_string()));
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(invalid(format!(
                "gateway.host `{host}` is not a valid IP address or hostname"
            )));
        }
    }

    if config.routing.max_tokens == 0 {
        errors.push(invalid("routing.max_tokens must be at least 1".to_string()));
    }

    if config.routing.call_timeout_secs == 0 {
        errors.push(invalid(
            "routing.call_timeout_secs must be at least 1".to_string(),
        ));
    }

    check_non_negative(
        &mut errors,
        "carbon.grid_intensity_kg_per_kwh",
        config.carbon.grid_intensity_kg_per_kwh,
    );
    check_non_negative(
        &mut errors,
        "carbon.default_energy_per_token_kwh",
        config.carbon.default_energy_per_token_kwh,
    );

    if config.quality.min_words == 0 {
        errors.push(invalid("quality.min_words must be at least 1".to_string()));
    }

    validate_providers(config, &mut errors);
    validate_bands(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_providers(config: &EcorouteConfig, errors: &mut Vec<ConfigError>) {
    if config.providers.is_empty() {
        errors.push(invalid(
            "[[providers]] must contain at least one provider".to_string(),
        ));
        return;
    }

    let mut seen = HashSet::new();
    for (i, provider) in config.providers.iter().enumerate() {
        if provider.id.trim().is_empty() {
            errors.push(invalid(format!("providers[{i}].id must not be empty")));
        } else if provider.id == "none" {
            errors.push(invalid(format!(
                "providers[{i}].id `none` is reserved for exhausted results"
            )));
        } else if !seen.insert(provider.id.as_str()) {
            errors.push(invalid(format!(
                "duplicate provider id `{}` in [[providers]] array",
                provider.id
            )));
        }

        check_non_negative(
            errors,
            &format!("providers[{i}].energy_per_token_kwh"),
            provider.energy_per_token_kwh,
        );

        if provider.backend != Backend::Template
            && provider.model.as_deref().is_none_or(|m| m.trim().is_empty())
        {
            errors.push(invalid(format!(
                "providers[{i}] (`{}`) needs a model for its backend",
                provider.id
            )));
        }

        if i + 1 == config.providers.len() && provider.gate != GateSpec::Always {
            errors.push(invalid(format!(
                "the last provider (`{}`) must use gate kind `always` so every prompt has a fallback",
                provider.id
            )));
        }
    }
}

fn validate_bands(config: &EcorouteConfig, errors: &mut Vec<ConfigError>) {
    let bands = &config.routing.bands;
    if bands.is_empty() {
        errors.push(invalid("routing.bands must not be empty".to_string()));
        return;
    }

    let mut previous: Option<u32> = None;
    for (i, band) in bands.iter().enumerate() {
        if config.provider(&band.provider).is_none() {
            errors.push(invalid(format!(
                "routing.bands[{i}].provider `{}` is not in [[providers]]",
                band.provider
            )));
        }

        let is_last = i + 1 == bands.len();
        match band.max_score {
            Some(max) => {
                if is_last {
                    errors.push(invalid(format!(
                        "routing.bands[{i}] is the last band and must omit max_score"
                    )));
                }
                if let Some(prev) = previous
                    && max <= prev
                {
                    errors.push(invalid(format!(
                        "routing.bands[{i}].max_score {max} must be greater than {prev}"
                    )));
                }
                previous = Some(max);
            }
            None if !is_last => errors.push(invalid(format!(
                "routing.bands[{i}] omits max_score but is not the last band"
            ))),
            None => {}
        }
    }
}

fn check_non_negative(errors: &mut Vec<ConfigError>, key: &str, value: f64) {
    if !value.is_finite() || value < 0.0 {
        errors.push(invalid(format!(
            "{key} must be a non-negative number, got {value}"
        )));
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Validation { message }
}
