// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for ecoroute.
//!
//! Defines the provider adapter contract every answer backend implements,
//! the shared error type, and the request-scoped result records passed
//! between the router, the cascade, and the outer surfaces.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::EcorouteError;
pub use traits::{PluginAdapter, ProviderAdapter};
pub use types::{
    Attempt, AttemptOutcome, Category, FailureKind, HealthStatus, ProviderDescriptor, ProviderId,
    QueryResult, RoutingMode, Suggestion, TextResult,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ecoroute_error_has_all_variants() {
        let _config = EcorouteError::Config("test".into());
        let _empty = EcorouteError::EmptyInput;
        let _provider = EcorouteError::Provider {
            message: "test".into(),
            source: None,
        };
        let _transport = EcorouteError::Transport {
            message: "test".into(),
            source: Box::new(std::io::Error::other("test")),
        };
        let _no_answer = EcorouteError::NoAnswer {
            provider: "simple".into(),
        };
        let _timeout = EcorouteError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _internal = EcorouteError::Internal("test".into());
    }

    #[test]
    fn failure_kind_display_round_trip() {
        use std::str::FromStr;

        let kinds = [
            FailureKind::Timeout,
            FailureKind::Transport,
            FailureKind::Api,
            FailureKind::NoAnswer,
        ];
        for kind in &kinds {
            let s = kind.to_string();
            let parsed = FailureKind::from_str(&s).expect("should parse back");
            assert_eq!(*kind, parsed);
        }
        assert_eq!(FailureKind::NoAnswer.to_string(), "no_answer");
    }

    #[test]
    fn health_status_variants() {
        let healthy = HealthStatus::Healthy;
        let degraded = HealthStatus::Degraded("slow".into());
        let unhealthy = HealthStatus::Unhealthy("down".into());

        assert_eq!(healthy, HealthStatus::Healthy);
        assert_ne!(degraded, healthy);
        assert_ne!(unhealthy, healthy);
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_provider_adapter<T: ProviderAdapter>() {}
    }
}
