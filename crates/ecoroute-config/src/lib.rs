// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the ecoroute router.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and diagnostic
//! error rendering with typo suggestions.
//!
//! The provider table, capability gates, suggestion bands, carbon constants
//! and quality rules are all plain data here, so the router and the cascade
//! never hard-code a tier.
//!
//! # Usage
//!
//! ```no_run
//! use ecoroute_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("{} providers", config.providers.len());
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::EcorouteConfig;

use std::path::Path;

/// Load configuration from the XDG hierarchy and validate it.
///
/// On a Figment error the raw error is converted into miette diagnostics
/// with source spans taken from whichever config files exist on disk.
pub fn load_and_validate() -> Result<EcorouteConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            tracing::debug!(
                providers = config.providers.len(),
                bands = config.routing.bands.len(),
                "configuration loaded"
            );
            Ok(config)
        }
        Err(err) => {
            let toml_sources = collect_toml_sources();
            Err(diagnostic::figment_to_config_errors(err, &toml_sources))
        }
    }
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<EcorouteConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<EcorouteConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut sources = Vec::new();

    if let Ok(content) = std::fs::read_to_string(loader::LOCAL_CONFIG_PATH) {
        let path = std::env::current_dir()
            .map(|d| d.join(loader::LOCAL_CONFIG_PATH).display().to_string())
            .unwrap_or_else(|_| loader::LOCAL_CONFIG_PATH.to_string());
        sources.push((path, content));
    }

    if let Some(path) = loader::user_config_path()
        && let Ok(content) = std::fs::read_to_string(&path)
    {
        sources.push((path.display().to_string(), content));
    }

    let system_path = Path::new(loader::SYSTEM_CONFIG_PATH);
    if let Ok(content) = std::fs::read_to_string(system_path) {
        sources.push((system_path.display().to_string(), content));
    }

    sources
}
