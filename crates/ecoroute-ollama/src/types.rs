// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama `/api/generate` wire types.

use serde::{Deserialize, Serialize};

/// Body of a non-streaming `/api/generate` call.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    /// Always `false`: the router wants the whole answer in one body.
    pub stream: bool,
    pub options: GenerateOptions,
}

/// Sampling options. Only the output cap is set.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOptions {
    /// Maximum number of tokens to predict.
    pub num_predict: u32,
}

/// Response to a non-streaming `/api/generate` call.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub model: String,
    pub response: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub eval_count: Option<u32>,
}

/// Error body, e.g. `{"error":"model 'x' not found"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
