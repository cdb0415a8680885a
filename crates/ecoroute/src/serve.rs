// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ecoroute serve` command implementation.
//!
//! Builds the provider registry and the routing engine, installs the
//! Prometheus recorder, and serves the HTTP gateway until SIGINT/SIGTERM.

use std::sync::Arc;

use ecoroute_cascade::EcoRouter;
use ecoroute_config::EcorouteConfig;
use ecoroute_core::EcorouteError;
use ecoroute_gateway::Gateway;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::providers::build_registry;

/// Runs the `ecoroute serve` command.
pub async fn run_serve(config: EcorouteConfig) -> Result<(), EcorouteError> {
    info!(name = config.server.name, "starting ecoroute serve");

    let registry = build_registry(&config)?;
    let router = Arc::new(EcoRouter::from_config(&config, registry));

    for (id, health) in router.provider_health().await {
        debug!(provider = %id, ?health, "provider health at startup");
    }

    #[allow(unused_mut)]
    let mut gateway = Gateway::from_config(&config.gateway, router);

    #[cfg(feature = "prometheus")]
    if config.gateway.metrics {
        match ecoroute_prometheus::PrometheusAdapter::new() {
            Ok(prometheus) => {
                let prometheus = Arc::new(prometheus);
                gateway = gateway.with_metrics(Arc::new(move || prometheus.render()));
            }
            Err(e) => warn!(error = %e, "metrics disabled"),
        }
    }

    let cancel = install_signal_handler();
    gateway
        .run(async move { cancel.cancelled().await })
        .await?;

    info!("ecoroute serve shutdown complete");
    Ok(())
}

/// Cancels the returned token on SIGINT, or SIGTERM on unix.
pub fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = ctrl_c => info!("received SIGINT (Ctrl+C), initiating shutdown"),
                        _ = sigterm.recv() => info!("received SIGTERM, initiating shutdown"),
                    }
                }
                Err(e) => {
                    warn!(error = %e, "failed to install SIGTERM handler, waiting for Ctrl+C only");
                    let _ = ctrl_c.await;
                    info!("received SIGINT (Ctrl+C), initiating shutdown");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
            info!("received Ctrl+C, initiating shutdown");
        }

        token_clone.cancel();
        debug!("shutdown signal handler completed");
    });

    token
}

/// Initializes the tracing subscriber. Logs go to stderr so command output
/// on stdout stays machine-readable.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ecoroute={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
