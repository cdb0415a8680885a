// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Messages API request/response types.

use serde::{Deserialize, Serialize};

/// A single-turn request to the Anthropic Messages API.
#[derive(Debug, Clone, Serialize)]
pub struct MessageRequest {
    /// Model identifier (e.g., "claude-3-haiku-20240307").
    pub model: String,

    /// Conversation messages. The router only ever sends one user turn.
    pub messages: Vec<ApiMessage>,

    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

impl MessageRequest {
    /// Builds a request holding `prompt` as the only user message.
    pub fn user_prompt(model: &str, prompt: &str, max_tokens: u32) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens,
        }
    }
}

/// A single message in the Anthropic conversation format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Role: "user" or "assistant".
    pub role: String,

    /// Plain text content.
    pub content: String,
}

/// A full response from the Anthropic Messages API.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    /// Response ID.
    pub id: String,
    /// Content blocks in the response.
    pub content: Vec<ResponseContentBlock>,
    /// Model that generated the response.
    pub model: String,
    /// Reason the generation stopped.
    pub stop_reason: Option<String>,
    /// Token usage statistics.
    #[serde(default)]
    pub usage: ApiUsage,
}

impl MessageResponse {
    /// Concatenates every text block, in order. Non-text blocks are skipped.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ResponseContentBlock::Text { text } => Some(text.as_str()),
                ResponseContentBlock::Other => None,
            })
            .collect()
    }
}

/// A content block in a response.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ResponseContentBlock {
    /// Text content block.
    #[serde(rename = "text")]
    Text { text: String },
    /// Any block type the router does not consume (tool use, thinking).
    #[serde(other)]
    Other,
}

/// Token usage statistics from the API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiUsage {
    /// Number of input tokens consumed.
    pub input_tokens: u32,
    /// Number of output tokens generated.
    pub output_tokens: u32,
}

/// Error response body from the Anthropic API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Error details.
    pub error: ApiErrorDetail,
}

/// Error detail within an API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    /// Error type identifier.
    #[serde(rename = "type")]
    pub type_: String,
    /// Human-readable error message.
    pub message: String,
}
