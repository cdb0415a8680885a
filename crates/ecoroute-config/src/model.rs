// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for ecoroute.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use ecoroute_core::Category;
use serde::{Deserialize, Serialize};

/// Top-level ecoroute configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to the four-tier provider table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EcorouteConfig {
    /// Process identity and logging.
    #[serde(default)]
    pub server: ServerConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Cascade limits and tier suggestion bands.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Carbon estimation constants.
    #[serde(default)]
    pub carbon: CarbonConfig,

    /// Response quality heuristics.
    #[serde(default)]
    pub quality: QualityConfig,

    /// Canned-answer provider settings.
    #[serde(default)]
    pub template: TemplateConfig,

    /// Local Ollama server settings.
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Hugging Face inference API settings.
    #[serde(default)]
    pub huggingface: HuggingFaceConfig,

    /// Anthropic API settings.
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Ordered provider table, cheapest first. The last entry must be always-eligible.
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,
}

impl Default for EcorouteConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            gateway: GatewayConfig::default(),
            routing: RoutingConfig::default(),
            carbon: CarbonConfig::default(),
            quality: QualityConfig::default(),
            template: TemplateConfig::default(),
            ollama: OllamaConfig::default(),
            huggingface: HuggingFaceConfig::default(),
            anthropic: AnthropicConfig::default(),
            providers: default_providers(),
        }
    }
}

impl EcorouteConfig {
    /// Look up a provider entry by id.
    pub fn provider(&self, id: &str) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.id == id)
    }
}

/// Process identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Display name used in health responses.
    #[serde(default = "default_server_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_server_name() -> String {
    "ecoroute".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Bearer token required on `/api/*` routes. `None` leaves them open.
    #[serde(default)]
    pub bearer_token: Option<String>,

    /// Expose Prometheus metrics at `/metrics`.
    #[serde(default = "default_true")]
    pub metrics: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
            bearer_token: None,
            metrics: true,
        }
    }
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    5001
}

fn default_true() -> bool {
    true
}

/// Cascade limits and tier suggestion configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Maximum tokens requested from each provider.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Ceiling on a single provider call. A timeout counts as a failure.
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,

    /// Score bands for tier suggestions, in ascending order of impact.
    #[serde(default = "default_bands")]
    pub bands: Vec<BandConfig>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            call_timeout_secs: default_call_timeout_secs(),
            bands: default_bands(),
        }
    }
}

fn default_max_tokens() -> u32 {
    100
}

fn default_call_timeout_secs() -> u64 {
    30
}

/// One score band of the tier selector.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BandConfig {
    /// Inclusive upper bound on the complexity score. Omitted on the last band.
    #[serde(default)]
    pub max_score: Option<u32>,
    /// Provider id recommended for this band.
    pub provider: String,
    /// Confidence label ("high", "medium").
    pub confidence: String,
    /// Human-readable justification.
    pub reason: String,
    /// Static savings label relative to the top tier.
    pub carbon_savings: String,
}

fn band(max_score: Option<u32>, provider: &str, confidence: &str, reason: &str, savings: &str) -> BandConfig {
    BandConfig {
        max_score,
        provider: provider.to_string(),
        confidence: confidence.to_string(),
        reason: reason.to_string(),
        carbon_savings: savings.to_string(),
    }
}

fn default_bands() -> Vec<BandConfig> {
    vec![
        band(
            Some(3),
            "simple",
            "high",
            "Simple query that can be handled efficiently with basic knowledge",
            "95%",
        ),
        band(
            Some(5),
            "tinyllama",
            "high",
            "Short general question suited to a small local model",
            "75%",
        ),
        band(
            Some(8),
            "huggingface",
            "medium",
            "Technical or quantitative query suited to a mid-sized model",
            "95%",
        ),
        band(
            Some(12),
            "claude",
            "medium",
            "Complex query requiring advanced reasoning and analysis",
            "0%",
        ),
        band(
            None,
            "claude",
            "high",
            "Very complex query requiring the most capable model",
            "0%",
        ),
    ]
}

/// Carbon estimation constants.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CarbonConfig {
    /// Grid carbon intensity in kg CO2 per kWh.
    #[serde(default = "default_grid_intensity")]
    pub grid_intensity_kg_per_kwh: f64,

    /// Energy coefficient used for provider ids missing from the table.
    #[serde(default = "default_energy_per_token")]
    pub default_energy_per_token_kwh: f64,
}

impl Default for CarbonConfig {
    fn default() -> Self {
        Self {
            grid_intensity_kg_per_kwh: default_grid_intensity(),
            default_energy_per_token_kwh: default_energy_per_token(),
        }
    }
}

fn default_grid_intensity() -> f64 {
    0.4
}

fn default_energy_per_token() -> f64 {
    0.000001
}

/// Response quality heuristics.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QualityConfig {
    /// Responses with fewer words are rejected.
    #[serde(default = "default_min_words")]
    pub min_words: usize,

    /// Substrings marking a provider error leaked into text.
    #[serde(default = "default_error_markers")]
    pub error_markers: Vec<String>,

    /// Reject responses where every line contains "by".
    #[serde(default = "default_true")]
    pub reject_attribution_stubs: bool,

    /// Reject responses containing both "write" and "poem".
    #[serde(default = "default_true")]
    pub reject_write_poem: bool,

    /// Require poem responses to mention one of `poem_topic_words`.
    #[serde(default = "default_true")]
    pub poem_topic_check: bool,

    /// Words a poem response must mention when `poem_topic_check` is on.
    #[serde(default = "default_poem_topic_words")]
    pub poem_topic_words: Vec<String>,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_words: default_min_words(),
            error_markers: default_error_markers(),
            reject_attribution_stubs: true,
            reject_write_poem: true,
            poem_topic_check: true,
            poem_topic_words: default_poem_topic_words(),
        }
    }
}

fn default_min_words() -> usize {
    4
}

fn default_error_markers() -> Vec<String> {
    vec!["api error:".to_string()]
}

fn default_poem_topic_words() -> Vec<String> {
    vec!["cat".to_string(), "snow".to_string()]
}

/// Canned-answer provider settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateConfig {
    /// Answer unmatched prompts with a generic "simplified response" instead of declining.
    #[serde(default)]
    pub generic_answer: bool,
}

/// Local Ollama server settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OllamaConfig {
    /// Base URL of the Ollama HTTP API.
    #[serde(default = "default_ollama_url")]
    pub base_url: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_url(),
        }
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

/// Hugging Face inference API settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HuggingFaceConfig {
    /// Base URL of the inference API.
    #[serde(default = "default_huggingface_url")]
    pub base_url: String,

    /// API token. `None` falls back to the `HF_API_TOKEN` environment variable.
    #[serde(default)]
    pub api_token: Option<String>,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            base_url: default_huggingface_url(),
            api_token: None,
        }
    }
}

fn default_huggingface_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

/// Anthropic API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnthropicConfig {
    /// Anthropic API key. `None` falls back to the `ANTHROPIC_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Anthropic API version string.
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_version: default_api_version(),
        }
    }
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

/// Which adapter implementation serves a provider entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    Template,
    Ollama,
    Huggingface,
    Anthropic,
}

/// Eligibility rule for a provider, evaluated against prompt features.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GateSpec {
    /// Eligible while the token count is below `below_tokens` and none of
    /// `excluded` matched.
    ShortQuery {
        below_tokens: usize,
        #[serde(default)]
        excluded: Vec<Category>,
    },
    /// Eligible up to `max_tokens` when none of `excluded` matched.
    General {
        max_tokens: usize,
        #[serde(default)]
        excluded: Vec<Category>,
    },
    /// Eligible when any of `categories` matched or up to `max_tokens`.
    Specialist {
        categories: Vec<Category>,
        max_tokens: usize,
    },
    /// Always eligible.
    Always,
}

/// One entry of the provider table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Registry identifier reported as `model_used`.
    pub id: String,
    /// Human-readable name.
    pub display_name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Coarse footprint label.
    #[serde(default)]
    pub carbon_label: String,
    /// Approximate inference energy in kWh per token.
    pub energy_per_token_kwh: f64,
    /// Adapter implementation.
    pub backend: Backend,
    /// Backend model name. Required for every backend except `template`.
    #[serde(default)]
    pub model: Option<String>,
    /// Eligibility rule.
    pub gate: GateSpec,
}

fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig {
            id: "simple".to_string(),
            display_name: "Simple Model".to_string(),
            description: "Canned answers for common sustainability questions".to_string(),
            carbon_label: "Very Low".to_string(),
            energy_per_token_kwh: 0.0000001,
            backend: Backend::Template,
            model: None,
            gate: GateSpec::ShortQuery {
                below_tokens: 50,
                excluded: vec![Category::Coding, Category::Math],
            },
        },
        ProviderConfig {
            id: "tinyllama".to_string(),
            display_name: "TinyLlama 1.1B".to_string(),
            description: "Small local model for short general questions".to_string(),
            carbon_label: "Low".to_string(),
            energy_per_token_kwh: 0.0000005,
            backend: Backend::Ollama,
            model: Some("tinyllama".to_string()),
            gate: GateSpec::General {
                max_tokens: 30,
                excluded: vec![Category::Coding, Category::Math],
            },
        },
        ProviderConfig {
            id: "huggingface".to_string(),
            display_name: "GPT-2 (Hugging Face)".to_string(),
            description: "Mid-sized model for code and quantitative prompts".to_string(),
            carbon_label: "Low".to_string(),
            energy_per_token_kwh: 0.0000001,
            backend: Backend::Huggingface,
            model: Some("gpt2".to_string()),
            gate: GateSpec::Specialist {
                categories: vec![Category::Coding, Category::Math],
                max_tokens: 60,
            },
        },
        ProviderConfig {
            id: "claude".to_string(),
            display_name: "Claude Haiku".to_string(),
            description: "Advanced AI model for complex queries".to_string(),
            carbon_label: "Medium".to_string(),
            energy_per_token_kwh: 0.000002,
            backend: Backend::Anthropic,
            model: Some("claude-3-haiku-20240307".to_string()),
            gate: GateSpec::Always,
        },
    ]
}
