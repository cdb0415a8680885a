// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prometheus metrics for the ecoroute router.
//!
//! Uses the metrics-rs facade with the Prometheus exporter.
//! Metrics are rendered as Prometheus text format via the `render()` method,
//! which is exposed through the gateway's /metrics endpoint.

pub mod recording;

use async_trait::async_trait;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use ecoroute_core::{EcorouteError, HealthStatus, PluginAdapter};

pub use recording::{record_attempt, record_carbon, record_latency, record_query};

/// Prometheus metrics adapter.
///
/// Installs the Prometheus recorder and exposes a handle for rendering
/// metrics in Prometheus text format.
pub struct PrometheusAdapter {
    handle: PrometheusHandle,
}

impl PrometheusAdapter {
    /// Install the Prometheus recorder globally.
    ///
    /// Only one recorder can be installed per process. Returns an error if a
    /// recorder is already installed.
    pub fn new() -> Result<Self, EcorouteError> {
        let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
            EcorouteError::Internal(format!("failed to install Prometheus recorder: {e}"))
        })?;

        recording::register_metrics();

        tracing::info!("prometheus metrics recorder installed");

        Ok(Self { handle })
    }

    /// Build a recorder without installing it globally.
    pub fn detached() -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();
        Self {
            handle: recorder.handle(),
        }
    }

    pub fn handle(&self) -> &PrometheusHandle {
        &self.handle
    }

    /// Render all collected metrics in Prometheus text format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

#[async_trait]
impl PluginAdapter for PrometheusAdapter {
    fn name(&self) -> &str {
        "prometheus"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, EcorouteError> {
        Ok(HealthStatus::Healthy)
    }
}
