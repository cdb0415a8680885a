// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process tests of the HTTP API over a mock-backed router.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use ecoroute_config::model::GatewayConfig;
use ecoroute_core::FailureKind;
use ecoroute_gateway::Gateway;
use ecoroute_test_utils::{MockProvider, TestHarness};
use serde_json::Value;
use tower::ServiceExt;

fn gateway(harness: &TestHarness, bearer_token: Option<&str>) -> Gateway {
    let config = GatewayConfig {
        bearer_token: bearer_token.map(str::to_string),
        ..GatewayConfig::default()
    };
    Gateway::from_config(&config, Arc::clone(&harness.router))
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn public_health_reports_healthy() {
    let harness = TestHarness::with_defaults().unwrap();
    let (status, json) = send(gateway(&harness, Some("t")).app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn query_returns_query_result() {
    let harness = TestHarness::with_defaults().unwrap();
    let (status, json) = send(
        gateway(&harness, None).app(),
        post_json("/api/query", serde_json::json!({"query": "What is wind power?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["model_used"], "simple");
    assert_eq!(json["tokens_used"], 4);
    assert_eq!(json["routing"], "auto");
    assert!(json["carbon_footprint_grams"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn empty_query_is_bad_request_and_invokes_nothing() {
    let harness = TestHarness::with_defaults().unwrap();
    let (status, json) = send(
        gateway(&harness, None).app(),
        post_json("/api/query", serde_json::json!({"query": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Query is required");
    assert_eq!(harness.total_calls(), 0);
}

#[tokio::test]
async fn missing_query_field_is_bad_request() {
    let harness = TestHarness::with_defaults().unwrap();
    let (status, json) = send(
        gateway(&harness, None).app(),
        post_json("/api/suggest-model", serde_json::json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Query is required");
}

#[tokio::test]
async fn suggested_model_forces_provider() {
    let harness = TestHarness::with_defaults().unwrap();
    let (status, json) = send(
        gateway(&harness, None).app(),
        post_json(
            "/api/query",
            serde_json::json!({"query": "What is wind power?", "suggested_model": "claude"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["model_used"], "claude");
    assert_eq!(json["routing"], "forced");
    assert_eq!(harness.mock("simple").unwrap().calls(), 0);
}

#[tokio::test]
async fn exhausted_cascade_is_still_ok() {
    let harness = TestHarness::builder()
        .with_mock("simple", MockProvider::failing("simple", FailureKind::NoAnswer))
        .with_mock("tinyllama", MockProvider::failing("tinyllama", FailureKind::Transport))
        .with_mock("huggingface", MockProvider::failing("huggingface", FailureKind::Api))
        .with_mock("claude", MockProvider::failing("claude", FailureKind::Timeout))
        .build()
        .unwrap();
    let (status, json) = send(
        gateway(&harness, None).app(),
        post_json("/api/query", serde_json::json!({"query": "hello there"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["model_used"], "none");
    assert_eq!(json["carbon_footprint_grams"], 0.0);
}

#[tokio::test]
async fn suggest_model_never_invokes_providers() {
    let harness = TestHarness::with_defaults().unwrap();
    let (status, json) = send(
        gateway(&harness, None).app(),
        post_json("/api/suggest-model", serde_json::json!({"query": "What is wind power?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["query"], "What is wind power?");
    assert_eq!(json["suggestion"]["suggested_model"], "simple");
    assert_eq!(harness.total_calls(), 0);
}

#[tokio::test]
async fn classify_reports_categories() {
    let harness = TestHarness::with_defaults().unwrap();
    let (status, json) = send(
        gateway(&harness, None).app(),
        post_json("/api/classify", serde_json::json!({"query": "Write a python function"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let categories: Vec<&str> = json["categories"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(categories.contains(&"coding"));
    assert!(categories.contains(&"creative"));
}

#[tokio::test]
async fn models_lists_table_in_cost_order() {
    let harness = TestHarness::with_defaults().unwrap();
    let (status, json) = send(gateway(&harness, None).app(), get("/api/models")).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = json["models"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|m| m["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["simple", "tinyllama", "huggingface", "claude"]);
    assert_eq!(json["models"][0]["carbon_footprint"], "Very Low");
}

#[tokio::test]
async fn provider_health_is_degraded_when_one_is_down() {
    let harness = TestHarness::builder()
        .with_mock(
            "tinyllama",
            MockProvider::new("tinyllama")
                .with_health(ecoroute_core::HealthStatus::Unhealthy("ollama down".into())),
        )
        .build()
        .unwrap();
    let (status, json) = send(gateway(&harness, None).app(), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["providers"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn api_requires_token_when_configured() {
    let harness = TestHarness::with_defaults().unwrap();
    let gw = gateway(&harness, Some("s3cret"));

    let (status, _) = send(gw.app(), get("/api/models")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .uri("/api/models")
        .header("authorization", "Bearer s3cret")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(gw.app(), request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn metrics_disabled_is_not_found() {
    let harness = TestHarness::with_defaults().unwrap();
    let response = gateway(&harness, None).app().oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metrics_render_is_served_as_text() {
    let harness = TestHarness::with_defaults().unwrap();
    let gw = gateway(&harness, None)
        .with_metrics(Arc::new(|| "ecoroute_queries_total{model=\"simple\"} 1\n".to_string()));
    let response = gw.app().oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("ecoroute_queries_total"));
}
