// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for answer backends (canned text, local models, remote APIs).

use async_trait::async_trait;

use crate::error::EcorouteError;
use crate::traits::adapter::PluginAdapter;

/// Adapter for one answer-generation backend.
///
/// Each provider exposes exactly one operation. Errors are recovered by the
/// cascade, which moves on to the next provider; an adapter must never
/// return an error message as if it were an answer.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Generates a response to `prompt`, producing at most `max_tokens` tokens.
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, EcorouteError>;
}
