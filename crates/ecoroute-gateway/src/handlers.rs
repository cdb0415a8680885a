// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.
//!
//! Handles POST /api/query, POST /api/suggest-model, POST /api/classify,
//! GET /api/models, GET /api/health, plus the public /health and /metrics.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use ecoroute_core::{EcorouteError, HealthStatus, ProviderDescriptor, ProviderId, QueryResult, Suggestion};
use ecoroute_router::ScoreReport;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::server::GatewayState;

/// Request body for POST /api/query.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Prompt text. Missing and empty are both rejected with 400.
    #[serde(default)]
    pub query: String,
    /// Optional provider id that bypasses automatic routing.
    #[serde(default)]
    pub suggested_model: Option<String>,
}

/// Request body for POST /api/suggest-model and POST /api/classify.
#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub query: String,
}

/// Response body for POST /api/suggest-model.
#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub query: String,
    pub suggestion: Suggestion,
}

/// Response body for GET /api/models.
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ProviderDescriptor>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process serves requests.
    pub status: String,
    pub message: String,
    /// Binary version.
    pub version: String,
    /// Seconds since the gateway state was created.
    pub uptime_secs: u64,
}

/// One provider's entry in GET /api/health.
#[derive(Debug, Serialize)]
pub struct ProviderHealth {
    pub provider: ProviderId,
    pub health: HealthStatus,
}

/// Response body for GET /api/health.
#[derive(Debug, Serialize)]
pub struct ProvidersHealthResponse {
    /// "healthy" when every provider is healthy, otherwise "degraded".
    pub status: String,
    pub providers: Vec<ProviderHealth>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Maps router errors to HTTP status codes.
#[derive(Debug)]
pub struct ApiError(pub EcorouteError);

impl From<EcorouteError> for ApiError {
    fn from(err: EcorouteError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            EcorouteError::EmptyInput => (StatusCode::BAD_REQUEST, "Query is required".to_string()),
            other => {
                error!(error = %other, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// GET /health
///
/// Unauthenticated liveness probe.
pub async fn get_public_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "ecoroute carbon-aware router is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
    })
}

/// GET /metrics
///
/// Prometheus text exposition, or 404 when no recorder is installed.
pub async fn get_public_metrics(State(state): State<GatewayState>) -> Response {
    match &state.health.prometheus_render {
        Some(render) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            render(),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "metrics are disabled".to_string(),
            }),
        )
            .into_response(),
    }
}

/// POST /api/query
///
/// Routes the prompt through the cascade and returns the terminal record.
/// An exhausted cascade is still a 200 with `model_used = "none"`.
pub async fn post_query(
    State(state): State<GatewayState>,
    Json(body): Json<QueryRequest>,
) -> Result<Json<QueryResult>, ApiError> {
    let forced = body.suggested_model.as_deref().filter(|m| !m.trim().is_empty());
    let result = state.router.route(&body.query, forced).await?;
    info!(
        model_used = result.model_used,
        routing = %result.routing,
        attempts = result.attempts.len(),
        "query answered"
    );
    Ok(Json(result))
}

/// POST /api/suggest-model
///
/// Advisory tier recommendation. Never invokes a provider.
pub async fn post_suggest_model(
    State(state): State<GatewayState>,
    Json(body): Json<PromptRequest>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let suggestion = state.router.suggest_tier(&body.query)?;
    Ok(Json(SuggestResponse {
        query: body.query,
        suggestion,
    }))
}

/// POST /api/classify
pub async fn post_classify(
    State(state): State<GatewayState>,
    Json(body): Json<PromptRequest>,
) -> Result<Json<ScoreReport>, ApiError> {
    Ok(Json(state.router.classify_and_score(&body.query)?))
}

/// GET /api/models
pub async fn get_models(State(state): State<GatewayState>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: state.router.list_providers().to_vec(),
    })
}

/// GET /api/health
///
/// Runs every provider's health check.
pub async fn get_provider_health(State(state): State<GatewayState>) -> Json<ProvidersHealthResponse> {
    let providers: Vec<ProviderHealth> = state
        .router
        .provider_health()
        .await
        .into_iter()
        .map(|(provider, health)| ProviderHealth { provider, health })
        .collect();
    let all_healthy = providers.iter().all(|p| p.health == HealthStatus::Healthy);
    Json(ProvidersHealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        providers,
    })
}
