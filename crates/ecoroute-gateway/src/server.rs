// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use ecoroute_cascade::EcoRouter;
use ecoroute_config::model::GatewayConfig;
use ecoroute_core::EcorouteError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{AuthConfig, auth_middleware};
use crate::handlers;

/// Metrics render callback, set when a Prometheus recorder is installed.
pub type MetricsRender = Arc<dyn Fn() -> String + Send + Sync>;

/// Health state for the unauthenticated health/metrics endpoints.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: Instant,
    /// Optional Prometheus metrics render function.
    pub prometheus_render: Option<MetricsRender>,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The routing engine. Read-only and shared by every request.
    pub router: Arc<EcoRouter>,
    /// Authentication configuration.
    pub auth: AuthConfig,
    /// Health state for unauthenticated endpoints.
    pub health: HealthState,
}

impl GatewayState {
    pub fn new(router: Arc<EcoRouter>, auth: AuthConfig) -> Self {
        Self {
            router,
            auth,
            health: HealthState {
                start_time: Instant::now(),
                prometheus_render: None,
            },
        }
    }

    /// Exposes `/metrics` through `render`.
    pub fn with_metrics(mut self, render: MetricsRender) -> Self {
        self.health.prometheus_render = Some(render);
        self
    }
}

/// Gateway server configuration.
#[derive(Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Bearer token for auth (None = auth disabled).
    pub bearer_token: Option<String>,
}

impl From<&GatewayConfig> for ServerConfig {
    fn from(config: &GatewayConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            bearer_token: config.bearer_token.clone(),
        }
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

/// Builds the application router.
///
/// Routes:
/// - GET /health, GET /metrics (no auth)
/// - POST /api/query, POST /api/suggest-model, POST /api/classify,
///   GET /api/models, GET /api/health (bearer auth when configured)
pub fn build_router(state: GatewayState) -> Router {
    let auth_state = state.auth.clone();

    // Unauthenticated public routes (health + metrics for probes and Prometheus).
    let public_routes = Router::new()
        .route("/health", get(handlers::get_public_health))
        .route("/metrics", get(handlers::get_public_metrics))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/api/query", post(handlers::post_query))
        .route("/api/suggest-model", post(handlers::post_suggest_model))
        .route("/api/classify", post(handlers::post_classify))
        .route("/api/models", get(handlers::get_models))
        .route("/api/health", get(handlers::get_provider_health))
        .route_layer(axum_middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the gateway HTTP server and serve until `shutdown` resolves.
pub async fn start_server<F>(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: F,
) -> Result<(), EcorouteError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| EcorouteError::Transport {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Box::new(e),
        })?;

    tracing::info!(
        addr,
        auth = config.bearer_token.is_some(),
        "gateway server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| EcorouteError::Transport {
            message: format!("gateway server error: {e}"),
            source: Box::new(e),
        })?;

    tracing::info!("gateway server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_from_gateway_config() {
        let gateway = GatewayConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            bearer_token: Some("s3cret".to_string()),
            ..GatewayConfig::default()
        };
        let config = ServerConfig::from(&gateway);
        assert_eq!(config.port, 8080);
        let debug = format!("{config:?}");
        assert!(debug.contains("0.0.0.0"));
        assert!(!debug.contains("s3cret"));
    }
}
