// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot CLI commands: `query`, `suggest`, `classify`, `providers`.
//!
//! Each command prints its result as pretty JSON on stdout.

use ecoroute_cascade::EcoRouter;
use ecoroute_core::EcorouteError;
use serde::Serialize;
use serde_json::json;

/// Routes `prompt` through the cascade, or straight to `forced`.
pub async fn query(
    router: &EcoRouter,
    prompt: &str,
    forced: Option<&str>,
) -> Result<String, EcorouteError> {
    let result = router.route(prompt, forced).await?;
    to_pretty(&result)
}

/// Prints the advisory tier for `prompt` without invoking any provider.
pub fn suggest(router: &EcoRouter, prompt: &str) -> Result<String, EcorouteError> {
    let suggestion = router.suggest_tier(prompt)?;
    to_pretty(&json!({ "query": prompt, "suggestion": suggestion }))
}

/// Prints the complexity score and matched categories for `prompt`.
pub fn classify(router: &EcoRouter, prompt: &str) -> Result<String, EcorouteError> {
    to_pretty(&router.classify_and_score(prompt)?)
}

/// Lists the provider table with each provider's current health.
pub async fn providers(router: &EcoRouter) -> Result<String, EcorouteError> {
    let health = router.provider_health().await;
    let models: Vec<_> = router
        .list_providers()
        .iter()
        .map(|descriptor| {
            let status = health
                .iter()
                .find(|(id, _)| *id == descriptor.id)
                .map(|(_, status)| status);
            json!({ "model": descriptor, "health": status })
        })
        .collect();
    to_pretty(&json!({ "models": models }))
}

fn to_pretty<T: Serialize>(value: &T) -> Result<String, EcorouteError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| EcorouteError::Internal(format!("failed to serialize output: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoroute_test_utils::TestHarness;

    #[tokio::test]
    async fn query_prints_query_result() {
        let harness = TestHarness::with_defaults().unwrap();
        let out = query(&harness.router, "What is wind power?", None).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["model_used"], "simple");
    }

    #[test]
    fn suggest_wraps_query_and_suggestion() {
        let harness = TestHarness::with_defaults().unwrap();
        let out = suggest(&harness.router, "hi").unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["query"], "hi");
        assert_eq!(json["suggestion"]["suggested_model"], "simple");
    }

    #[test]
    fn classify_rejects_empty_prompt() {
        let harness = TestHarness::with_defaults().unwrap();
        assert!(matches!(
            classify(&harness.router, "  "),
            Err(EcorouteError::EmptyInput)
        ));
    }

    #[tokio::test]
    async fn providers_include_health() {
        let harness = TestHarness::with_defaults().unwrap();
        let out = providers(&harness.router).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["models"][0]["model"]["id"], "simple");
        assert_eq!(json["models"][0]["health"]["status"], "healthy");
        assert_eq!(json["models"].as_array().unwrap().len(), 4);
    }
}
