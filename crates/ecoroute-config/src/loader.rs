// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./ecoroute.toml` > `~/.config/ecoroute/ecoroute.toml` >
//! `/etc/ecoroute/ecoroute.toml` with environment variable overrides via `ECOROUTE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::EcorouteConfig;

/// Sections whose keys may be overridden from the environment.
const ENV_SECTIONS: &[&str] = &[
    "server",
    "gateway",
    "routing",
    "carbon",
    "quality",
    "template",
    "ollama",
    "huggingface",
    "anthropic",
];

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/ecoroute/ecoroute.toml";

/// Local config file, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = "ecoroute.toml";

/// Path of the per-user config file, if a config directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ecoroute").join("ecoroute.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/ecoroute/ecoroute.toml` (system-wide)
/// 3. `~/.config/ecoroute/ecoroute.toml` (user XDG config)
/// 4. `./ecoroute.toml` (local directory)
/// 5. `ECOROUTE_*` environment variables
pub fn load_config() -> Result<EcorouteConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string layered over the defaults (no XDG lookup).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<EcorouteConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EcorouteConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<EcorouteConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EcorouteConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(EcorouteConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Create the environment variable provider.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `ECOROUTE_ROUTING_CALL_TIMEOUT_SECS` must map to
/// `routing.call_timeout_secs`, not `routing.call.timeout.secs`.
fn env_provider() -> Env {
    Env::prefixed("ECOROUTE_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env var name to a dotted config path.
pub fn map_env_key(key: &str) -> String {
    for section in ENV_SECTIONS {
        if let Some(rest) = key.strip_prefix(section)
            && let Some(field) = rest.strip_prefix('_')
        {
            return format!("{section}.{field}");
        }
    }
    key.to_string()
}
