// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all plugin adapters must implement.

use async_trait::async_trait;

use crate::error::EcorouteError;
use crate::types::HealthStatus;

/// The base trait for all ecoroute adapters.
///
/// Provides identity and health check capabilities. Adapters are built once
/// at startup and shared read-only across requests.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, EcorouteError>;
}
