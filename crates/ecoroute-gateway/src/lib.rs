// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the ecoroute router.
//!
//! Exposes routing, tier suggestion, classification and provider listing
//! as a small JSON API on axum, plus unauthenticated `/health` and
//! `/metrics` endpoints for probes and Prometheus.

pub mod auth;
pub mod handlers;
pub mod server;

use std::future::Future;
use std::sync::Arc;

use ecoroute_cascade::EcoRouter;
use ecoroute_config::model::GatewayConfig;
use ecoroute_core::EcorouteError;

pub use crate::auth::AuthConfig;
pub use crate::server::{GatewayState, HealthState, MetricsRender, ServerConfig, build_router, start_server};

/// A configured, not yet running, gateway.
#[derive(Clone)]
pub struct Gateway {
    config: ServerConfig,
    state: GatewayState,
}

impl Gateway {
    /// Builds a gateway around `router` using the `[gateway]` section.
    pub fn from_config(config: &GatewayConfig, router: Arc<EcoRouter>) -> Self {
        let config = ServerConfig::from(config);
        let auth = AuthConfig {
            bearer_token: config.bearer_token.clone(),
        };
        Self {
            state: GatewayState::new(router, auth),
            config,
        }
    }

    /// Exposes `/metrics` through `render`.
    pub fn with_metrics(mut self, render: MetricsRender) -> Self {
        self.state = self.state.with_metrics(render);
        self
    }

    /// The axum application, for in-process use (tests, embedding).
    pub fn app(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Binds the configured address and serves until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<(), EcorouteError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        start_server(&self.config, self.state, shutdown).await
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("config", &self.config)
            .field("metrics", &self.state.health.prometheus_render.is_some())
            .finish()
    }
}
