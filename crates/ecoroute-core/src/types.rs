// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the router, the cascade, and the outer surfaces.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::EcorouteError;

/// Identifier of a provider in the registry (e.g. `simple`, `claude`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(pub String);

impl ProviderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProviderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ProviderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for ProviderId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ProviderId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Keyword category recognised by the classifier.
///
/// Shared by the capability gates and the complexity scorer so category
/// definitions have one source of truth.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Reasoning,
    Coding,
    Technical,
    Math,
    Creative,
    Procedural,
    Elaboration,
    Conjunction,
}

impl Category {
    /// Every category, in classification order.
    pub const ALL: [Category; 8] = [
        Category::Reasoning,
        Category::Coding,
        Category::Technical,
        Category::Math,
        Category::Creative,
        Category::Procedural,
        Category::Elaboration,
        Category::Conjunction,
    ];
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Static metadata for one provider, as shown to callers.
///
/// The registry holds these in cost order, cheapest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderDescriptor {
    /// Registry identifier.
    pub id: ProviderId,
    /// Human-readable name.
    #[serde(rename = "name")]
    pub display_name: String,
    /// Short description of what the provider is good for.
    pub description: String,
    /// Coarse footprint label ("Very Low", "Low", ...).
    #[serde(rename = "carbon_footprint")]
    pub carbon_label: String,
    /// Approximate inference energy in kWh per token. A design constant, not a measurement.
    pub energy_per_token_kwh: f64,
}

/// Why a provider call did not produce text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The per-call deadline elapsed.
    Timeout,
    /// The backend could not be reached.
    Transport,
    /// The backend answered with an error.
    Api,
    /// The provider declined to answer.
    NoAnswer,
}

/// Outcome of one provider call.
///
/// A failure is never disguised as text, so callers cannot hand an
/// error string to the quality filter by accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextResult {
    Success(String),
    Failure { kind: FailureKind, detail: String },
}

impl TextResult {
    pub fn failure(kind: FailureKind, detail: impl Into<String>) -> Self {
        TextResult::Failure {
            kind,
            detail: detail.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TextResult::Success(_))
    }
}

impl From<Result<String, EcorouteError>> for TextResult {
    fn from(result: Result<String, EcorouteError>) -> Self {
        match result {
            Ok(text) => TextResult::Success(text),
            Err(err) => {
                let kind = match &err {
                    EcorouteError::Timeout { .. } => FailureKind::Timeout,
                    EcorouteError::Transport { .. } => FailureKind::Transport,
                    EcorouteError::NoAnswer { .. } => FailureKind::NoAnswer,
                    _ => FailureKind::Api,
                };
                TextResult::failure(kind, err.to_string())
            }
        }
    }
}

/// How the provider list for a request was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RoutingMode {
    /// Every gate-eligible provider, cheapest first.
    Auto,
    /// A single provider named by the caller.
    Forced,
}

/// What happened when one provider was tried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttemptOutcome {
    Accepted,
    Rejected { reason: String },
    Failed { kind: FailureKind, detail: String },
}

/// One step of the cascade, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attempt {
    pub provider: ProviderId,
    #[serde(flatten)]
    pub outcome: AttemptOutcome,
}

/// Terminal record returned to the caller for a routed prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// The prompt as received.
    pub prompt: String,
    /// Accepted response text, or the apology when every provider failed.
    pub response: String,
    /// Provider id that answered, or `"none"`.
    pub model_used: String,
    /// Whitespace word count of the trimmed prompt.
    pub tokens_used: usize,
    /// Estimated emissions in grams of CO2.
    #[serde(rename = "carbon_footprint_grams")]
    pub carbon_grams: f64,
    /// Whether the cascade was automatic or forced.
    pub routing: RoutingMode,
    /// Every provider tried, in order.
    pub attempts: Vec<Attempt>,
}

/// Advisory tier recommendation. Producing one never invokes a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    #[serde(rename = "suggested_model")]
    pub suggested_provider: ProviderId,
    #[serde(rename = "confidence")]
    pub confidence_label: String,
    #[serde(rename = "reason")]
    pub reason_text: String,
    #[serde(rename = "carbon_savings")]
    pub carbon_savings_label: String,
    pub complexity_score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_from_config_spelling() {
        use std::str::FromStr;
        assert_eq!(Category::from_str("math").unwrap(), Category::Math);
        let parsed: Category = serde_json::from_str("\"coding\"").unwrap();
        assert_eq!(parsed, Category::Coding);
        assert_eq!(Category::ALL.len(), 8);
    }

    #[test]
    fn provider_id_compares_with_str() {
        let id = ProviderId::from("claude");
        assert_eq!(id, "claude");
        assert_eq!(id.to_string(), "claude");
    }

    #[test]
    fn text_result_from_timeout_error() {
        let result: TextResult = Err(EcorouteError::Timeout {
            duration: std::time::Duration::from_secs(5),
        })
        .into();
        assert!(matches!(
            result,
            TextResult::Failure {
                kind: FailureKind::Timeout,
                ..
            }
        ));
    }

    #[test]
    fn text_result_from_provider_error_is_api_failure() {
        let result: TextResult = Err(EcorouteError::Provider {
            message: "bad model".into(),
            source: None,
        })
        .into();
        match result {
            TextResult::Failure { kind, detail } => {
                assert_eq!(kind, FailureKind::Api);
                assert!(detail.contains("bad model"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn text_result_from_ok_is_success() {
        let result: TextResult = Ok("hello there".to_string()).into();
        assert_eq!(result, TextResult::Success("hello there".into()));
        assert!(result.is_success());
    }

    #[test]
    fn query_result_uses_wire_field_names() {
        let result = QueryResult {
            prompt: "hi".into(),
            response: "hello".into(),
            model_used: "simple".into(),
            tokens_used: 1,
            carbon_grams: 0.00004,
            routing: RoutingMode::Auto,
            attempts: vec![Attempt {
                provider: "simple".into(),
                outcome: AttemptOutcome::Accepted,
            }],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["model_used"], "simple");
        assert_eq!(json["carbon_footprint_grams"], 0.00004);
        assert_eq!(json["routing"], "auto");
        assert_eq!(json["attempts"][0]["provider"], "simple");
        assert_eq!(json["attempts"][0]["outcome"], "accepted");
    }

    #[test]
    fn failed_attempt_serializes_kind() {
        let attempt = Attempt {
            provider: "claude".into(),
            outcome: AttemptOutcome::Failed {
                kind: FailureKind::Timeout,
                detail: "operation timed out".into(),
            },
        };
        let json = serde_json::to_value(&attempt).unwrap();
        assert_eq!(json["outcome"], "failed");
        assert_eq!(json["kind"], "timeout");
    }

    #[test]
    fn suggestion_uses_wire_field_names() {
        let s = Suggestion {
            suggested_provider: "simple".into(),
            confidence_label: "high".into(),
            reason_text: "short".into(),
            carbon_savings_label: "95%".into(),
            complexity_score: 1,
        };
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["suggested_model"], "simple");
        assert_eq!(json["confidence"], "high");
        assert_eq!(json["carbon_savings"], "95%");
    }
}
