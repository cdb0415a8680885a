// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics-rs facade, so without an installed recorder every call
//! here is a no-op.

use metrics::{describe_counter, describe_gauge, describe_histogram};

pub const QUERIES_TOTAL: &str = "ecoroute_queries_total";
pub const PROVIDER_ATTEMPTS_TOTAL: &str = "ecoroute_provider_attempts_total";
pub const CARBON_GRAMS_TOTAL: &str = "ecoroute_carbon_grams_total";
pub const PROVIDER_LATENCY_SECONDS: &str = "ecoroute_provider_latency_seconds";

/// Register all ecoroute metric descriptions.
///
/// Called once at startup after the recorder is installed.
pub fn register_metrics() {
    describe_counter!(QUERIES_TOTAL, "Routed queries by the provider that answered");
    describe_counter!(
        PROVIDER_ATTEMPTS_TOTAL,
        "Provider attempts by outcome (accepted, rejected, failed)"
    );
    describe_gauge!(
        CARBON_GRAMS_TOTAL,
        "Estimated grams of CO2 for all answered queries"
    );
    describe_histogram!(
        PROVIDER_LATENCY_SECONDS,
        "Provider generate latency in seconds"
    );
}

/// Record a finished query. `model` is the provider id or `none`.
pub fn record_query(model: &str) {
    metrics::counter!(QUERIES_TOTAL, "model" => model.to_string()).increment(1);
}

/// Record one provider attempt and how it ended.
pub fn record_attempt(provider: &str, outcome: &'static str) {
    metrics::counter!(
        PROVIDER_ATTEMPTS_TOTAL,
        "provider" => provider.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Add to the running carbon total.
pub fn record_carbon(grams: f64) {
    metrics::gauge!(CARBON_GRAMS_TOTAL).increment(grams);
}

/// Record the latency of one provider call.
pub fn record_latency(provider: &str, seconds: f64) {
    metrics::histogram!(PROVIDER_LATENCY_SECONDS, "provider" => provider.to_string())
        .record(seconds);
}
