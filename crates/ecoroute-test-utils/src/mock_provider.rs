// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock provider adapter for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` by replaying scripted
//! `TextResult`s, so cascade behaviour can be tested without any backend.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ecoroute_core::{
    EcorouteError, FailureKind, HealthStatus, PluginAdapter, ProviderAdapter, TextResult,
};

/// A mock provider that returns scripted outcomes.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty the
/// fallback outcome is returned. Clones share the queue and the call log.
#[derive(Clone)]
pub struct MockProvider {
    name: String,
    script: Arc<Mutex<VecDeque<TextResult>>>,
    fallback: TextResult,
    delay: Option<Duration>,
    health: HealthStatus,
    calls: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// A provider that always answers with a short, acceptable sentence.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            fallback: TextResult::Success(format!("This is a mock answer from {name}.")),
            delay: None,
            health: HealthStatus::Healthy,
            calls: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider that replays `script` in order, then the default answer.
    pub fn scripted(name: &str, script: Vec<TextResult>) -> Self {
        let mock = Self::new(name);
        Self {
            script: Arc::new(Mutex::new(VecDeque::from(script))),
            ..mock
        }
    }

    /// A provider that answers every call with `text`.
    pub fn answering(name: &str, text: &str) -> Self {
        Self::new(name).with_fallback(TextResult::Success(text.to_string()))
    }

    /// A provider whose every call fails with `kind`.
    pub fn failing(name: &str, kind: FailureKind) -> Self {
        Self::new(name).with_fallback(TextResult::failure(kind, format!("{name} is down")))
    }

    pub fn with_fallback(mut self, fallback: TextResult) -> Self {
        self.fallback = fallback;
        self
    }

    /// Sleep before answering, for timeout tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_health(mut self, health: HealthStatus) -> Self {
        self.health = health;
        self
    }

    /// Append an outcome to the script.
    pub async fn push(&self, outcome: TextResult) {
        self.script.lock().await.push_back(outcome);
    }

    /// Number of `generate` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received, in call order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    async fn next_outcome(&self) -> TextResult {
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }

    fn to_result(&self, outcome: TextResult) -> Result<String, EcorouteError> {
        match outcome {
            TextResult::Success(text) => Ok(text),
            TextResult::Failure { kind, detail } => Err(match kind {
                FailureKind::Timeout => EcorouteError::Timeout {
                    duration: self.delay.unwrap_or_default(),
                },
                FailureKind::Transport => EcorouteError::Transport {
                    message: detail.clone(),
                    source: Box::new(std::io::Error::other(detail)),
                },
                FailureKind::Api => EcorouteError::Provider {
                    message: detail,
                    source: None,
                },
                FailureKind::NoAnswer => EcorouteError::NoAnswer {
                    provider: self.name.clone(),
                },
            }),
        }
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, EcorouteError> {
        Ok(self.health.clone())
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn generate(&self, prompt: &str, _max_tokens: u32) -> Result<String, EcorouteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().await.push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let outcome = self.next_outcome().await;
        tracing::debug!(provider = self.name.as_str(), "mock provider answering");
        self.to_result(outcome)
    }
}
