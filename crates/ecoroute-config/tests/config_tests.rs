// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the ecoroute configuration system.

use ecoroute_config::diagnostic::{ConfigError, suggest_key};
use ecoroute_config::model::{Backend, EcorouteConfig, GateSpec};
use ecoroute_config::{load_and_validate_str, load_config_from_str};
use ecoroute_core::Category;

/// Valid TOML with all known sections deserializes successfully.
#[test]
fn valid_toml_deserializes_into_ecoroute_config() {
    let toml = r#"
[server]
name = "eco-test"
log_level = "debug"

[gateway]
host = "0.0.0.0"
port = 8080
bearer_token = "secret"

[routing]
max_tokens = 64
call_timeout_secs = 5

[carbon]
grid_intensity_kg_per_kwh = 0.2

[quality]
min_words = 3
poem_topic_check = false

[template]
generic_answer = true

[anthropic]
api_key = "sk-ant-123"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.name, "eco-test");
    assert_eq!(config.server.log_level, "debug");
    assert_eq!(config.gateway.port, 8080);
    assert_eq!(config.gateway.bearer_token.as_deref(), Some("secret"));
    assert_eq!(config.routing.max_tokens, 64);
    assert_eq!(config.routing.call_timeout_secs, 5);
    assert_eq!(config.carbon.grid_intensity_kg_per_kwh, 0.2);
    assert_eq!(config.quality.min_words, 3);
    assert!(!config.quality.poem_topic_check);
    assert!(config.template.generic_answer);
    assert_eq!(config.anthropic.api_key.as_deref(), Some("sk-ant-123"));
    // Untouched sections keep their defaults.
    assert_eq!(config.providers.len(), 4);
    assert_eq!(config.routing.bands.len(), 5);
}

/// An empty document yields the default four-tier table.
#[test]
fn empty_toml_yields_defaults() {
    let config = load_and_validate_str("").expect("defaults should validate");
    let ids: Vec<&str> = config.providers.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["simple", "tinyllama", "huggingface", "claude"]);
    assert_eq!(config.gateway.port, 5001);
    assert_eq!(config.carbon.grid_intensity_kg_per_kwh, 0.4);
}

/// A provider table in TOML replaces the default table wholesale.
#[test]
fn custom_provider_table_replaces_defaults() {
    let toml = r#"
[[routing.bands]]
max_score = 4
provider = "local"
confidence = "high"
reason = "short"
carbon_savings = "90%"

[[routing.bands]]
provider = "big"
confidence = "high"
reason = "long"
carbon_savings = "0%"

[[providers]]
id = "local"
display_name = "Local"
energy_per_token_kwh = 0.0000002
backend = "ollama"
model = "phi"
gate = { kind = "general", max_tokens = 40, excluded = ["coding"] }

[[providers]]
id = "big"
display_name = "Big"
energy_per_token_kwh = 0.000003
backend = "anthropic"
model = "claude-3-haiku-20240307"
gate = { kind = "always" }
"#;

    let config = load_and_validate_str(toml).expect("custom table should validate");
    assert_eq!(config.providers.len(), 2);
    assert_eq!(config.providers[0].backend, Backend::Ollama);
    assert_eq!(
        config.providers[0].gate,
        GateSpec::General {
            max_tokens: 40,
            excluded: vec![Category::Coding],
        }
    );
    assert_eq!(config.providers[1].gate, GateSpec::Always);
    assert_eq!(config.routing.bands[1].max_score, None);
}

/// Unknown field in [routing] produces an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_field_in_routing_suggests_correction() {
    let toml = r#"
[routing]
max_tokns = 10
"#;

    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(!errors.is_empty());
    let found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, suggestion, .. }
                if key == "max_tokns" && suggestion.as_deref() == Some("max_tokens")
        )
    });
    assert!(found, "expected UnknownKey for max_tokns, got {errors:?}");
}

/// Unknown top-level section is rejected.
#[test]
fn unknown_section_is_rejected() {
    let toml = r#"
[telemetry]
enabled = true
"#;
    let result = load_config_from_str(toml);
    assert!(result.is_err());
}

/// An unknown gate kind surfaces as an error rather than a silent default.
#[test]
fn unknown_gate_kind_is_rejected() {
    let toml = r#"
[[providers]]
id = "only"
display_name = "Only"
energy_per_token_kwh = 0.000001
backend = "template"
gate = { kind = "sometimes" }
"#;
    assert!(load_and_validate_str(toml).is_err());
}

/// Semantic errors are collected, not reported one at a time.
#[test]
fn validation_collects_every_error() {
    let toml = r#"
[server]
log_level = "chatty"

[routing]
max_tokens = 0
call_timeout_secs = 0
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    let validation_count = errors
        .iter()
        .filter(|e| matches!(e, ConfigError::Validation { .. }))
        .count();
    assert_eq!(validation_count, 3);
}

/// A table whose final entry is gated fails validation.
#[test]
fn gated_last_provider_fails_validation() {
    let toml = r#"
[[routing.bands]]
provider = "only"
confidence = "high"
reason = "r"
carbon_savings = "0%"

[[providers]]
id = "only"
display_name = "Only"
energy_per_token_kwh = 0.000001
backend = "template"
gate = { kind = "short_query", below_tokens = 10 }
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::Validation { message } if message.contains("gate kind `always`")
    )));
}

#[test]
fn default_config_serializes_back_to_toml() {
    let config = EcorouteConfig::default();
    let rendered = toml::to_string(&config).expect("defaults should serialize");
    let reparsed = load_and_validate_str(&rendered).expect("rendered defaults should validate");
    assert_eq!(reparsed.providers, config.providers);
    assert_eq!(reparsed.routing.bands, config.routing.bands);
}

#[test]
fn suggest_key_finds_backend_typo() {
    let valid = &["template", "ollama", "huggingface", "anthropic"];
    assert_eq!(suggest_key("antropic", valid), Some("anthropic".to_string()));
}
