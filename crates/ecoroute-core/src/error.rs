// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for ecoroute.

use thiserror::Error;

/// The primary error type used by provider adapters and the routing engine.
#[derive(Debug, Error)]
pub enum EcorouteError {
    /// Configuration errors (invalid provider table, bad header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The caller supplied no prompt text.
    #[error("query is required")]
    EmptyInput,

    /// The backend answered with an error (bad status, unparseable body).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend could not be reached.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The provider has nothing to say about this prompt.
    #[error("provider `{provider}` has no answer for this prompt")]
    NoAnswer { provider: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
