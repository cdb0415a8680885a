// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cascade orchestration.
//!
//! Tries providers one at a time in the given order. Each attempt is
//! bounded by a timeout, postprocessed, then checked for quality. The first
//! accepted answer ends the cascade; rejections and failures advance it.

use std::time::{Duration, Instant};

use ecoroute_config::model::RoutingConfig;
use ecoroute_core::{Attempt, AttemptOutcome, FailureKind, ProviderId, TextResult};
use ecoroute_router::Prompt;
use tracing::{debug, info, warn};

use crate::postprocess::collapse_duplicate_lines;
use crate::quality::{QualityFilter, Verdict};
use crate::registry::{ProviderEntry, ProviderRegistry};

/// Per-call limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeSettings {
    pub max_tokens: u32,
    pub call_timeout: Duration,
}

impl CascadeSettings {
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self {
            max_tokens: config.max_tokens,
            call_timeout: Duration::from_secs(config.call_timeout_secs),
        }
    }
}

impl Default for CascadeSettings {
    fn default() -> Self {
        Self::from_config(&RoutingConfig::default())
    }
}

/// Cascade progress.
#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Pending,
    Trying(usize),
    Accepted { provider: ProviderId, text: String },
    Exhausted,
}

/// The accepted answer, if any, and every attempt made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeOutcome {
    pub accepted: Option<Answer>,
    pub attempts: Vec<Attempt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub provider: ProviderId,
    pub text: String,
}

/// Sequential provider cascade.
#[derive(Debug)]
pub struct Cascade {
    quality: QualityFilter,
    settings: CascadeSettings,
}

impl Cascade {
    pub fn new(quality: QualityFilter, settings: CascadeSettings) -> Self {
        Self { quality, settings }
    }

    pub fn settings(&self) -> CascadeSettings {
        self.settings
    }

    /// Run `candidates` in order against `registry`.
    ///
    /// Ids missing from the registry are skipped without an attempt.
    pub async fn run(
        &self,
        registry: &ProviderRegistry,
        prompt: &Prompt,
        candidates: &[ProviderId],
    ) -> CascadeOutcome {
        let mut attempts = Vec::with_capacity(candidates.len());
        let mut state = State::Pending;

        loop {
            state = match state {
                State::Pending => Self::next_from(0, candidates),
                State::Trying(index) => {
                    let id = &candidates[index];
                    match registry.get(id.as_str()) {
                        None => {
                            warn!(provider = %id, "provider not registered, skipping");
                            Self::next_from(index + 1, candidates)
                        }
                        Some(entry) => {
                            let result = self.call(entry, prompt).await;
                            let (outcome, accepted_text) = self.judge(id, prompt, result);
                            ecoroute_prometheus::record_attempt(
                                id.as_str(),
                                outcome_label(&outcome),
                            );
                            attempts.push(Attempt {
                                provider: id.clone(),
                                outcome,
                            });
                            match accepted_text {
                                Some(text) => State::Accepted {
                                    provider: id.clone(),
                                    text,
                                },
                                None => Self::next_from(index + 1, candidates),
                            }
                        }
                    }
                }
                State::Accepted { provider, text } => {
                    info!(provider = %provider, attempts = attempts.len(), "response accepted");
                    return CascadeOutcome {
                        accepted: Some(Answer { provider, text }),
                        attempts,
                    };
                }
                State::Exhausted => {
                    warn!(attempts = attempts.len(), "all providers exhausted");
                    return CascadeOutcome {
                        accepted: None,
                        attempts,
                    };
                }
            };
        }
    }

    fn next_from(index: usize, candidates: &[ProviderId]) -> State {
        if index < candidates.len() {
            State::Trying(index)
        } else {
            State::Exhausted
        }
    }

    /// Invoke one adapter under the per-call timeout.
    async fn call(&self, entry: &ProviderEntry, prompt: &Prompt) -> TextResult {
        let id = entry.id().as_str();
        let started = Instant::now();
        let result = match tokio::time::timeout(
            self.settings.call_timeout,
            entry.adapter.generate(prompt.text(), self.settings.max_tokens),
        )
        .await
        {
            Ok(result) => TextResult::from(result),
            Err(_) => TextResult::failure(
                FailureKind::Timeout,
                format!("no response within {:?}", self.settings.call_timeout),
            ),
        };
        let elapsed = started.elapsed();
        ecoroute_prometheus::record_latency(id, elapsed.as_secs_f64());
        debug!(
            provider = id,
            elapsed_ms = elapsed.as_millis() as u64,
            success = result.is_success(),
            "provider call finished"
        );
        result
    }

    /// Postprocess and quality-check a call result. Returns the attempt
    /// outcome and, when accepted, the cleaned text.
    fn judge(
        &self,
        id: &ProviderId,
        prompt: &Prompt,
        result: TextResult,
    ) -> (AttemptOutcome, Option<String>) {
        match result {
            TextResult::Success(raw) => {
                let text = collapse_duplicate_lines(&raw);
                match self.quality.evaluate(prompt.text(), &text) {
                    Verdict::Accept => (AttemptOutcome::Accepted, Some(text)),
                    Verdict::Reject { rule, reason } => {
                        debug!(provider = %id, rule, reason = reason.as_str(), "response rejected");
                        (
                            AttemptOutcome::Rejected {
                                reason: format!("{rule}: {reason}"),
                            },
                            None,
                        )
                    }
                }
            }
            TextResult::Failure { kind, detail } => {
                warn!(provider = %id, kind = %kind, detail = detail.as_str(), "provider failed");
                (AttemptOutcome::Failed { kind, detail }, None)
            }
        }
    }
}

/// Metric label for an attempt outcome.
pub fn outcome_label(outcome: &AttemptOutcome) -> &'static str {
    match outcome {
        AttemptOutcome::Accepted => "accepted",
        AttemptOutcome::Rejected { .. } => "rejected",
        AttemptOutcome::Failed { .. } => "failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ecoroute_core::ProviderDescriptor;
    use ecoroute_router::CapabilityGate;
    use ecoroute_test_utils::MockProvider;

    use crate::registry::ProviderEntry;

    fn registry(mocks: &[(&str, MockProvider)]) -> ProviderRegistry {
        let entries = mocks
            .iter()
            .enumerate()
            .map(|(i, (id, mock))| ProviderEntry {
                descriptor: ProviderDescriptor {
                    id: (*id).into(),
                    display_name: id.to_string(),
                    description: String::new(),
                    carbon_label: String::new(),
                    energy_per_token_kwh: 0.0,
                },
                gate: if i + 1 == mocks.len() {
                    CapabilityGate::Always
                } else {
                    CapabilityGate::ShortQuery {
                        below_tokens: 10,
                        excluded: Vec::new(),
                    }
                },
                adapter: Arc::new(mock.clone()),
            })
            .collect();
        ProviderRegistry::new(entries).unwrap()
    }

    fn ids(names: &[&str]) -> Vec<ProviderId> {
        names.iter().map(|n| ProviderId::from(*n)).collect()
    }

    #[tokio::test]
    async fn stops_at_first_acceptance() {
        let a = MockProvider::answering("a", "Wind power is cheap and clean.");
        let b = MockProvider::new("b");
        let reg = registry(&[("a", a.clone()), ("b", b.clone())]);
        let cascade = Cascade::new(QualityFilter::default(), CascadeSettings::default());
        let prompt = Prompt::new("Is wind power good?").unwrap();

        let outcome = cascade.run(&reg, &prompt, &ids(&["a", "b"])).await;
        assert_eq!(outcome.accepted.unwrap().provider, "a");
        assert_eq!(outcome.attempts.len(), 1);
        assert_eq!((a.calls(), b.calls()), (1, 0));
    }

    #[tokio::test]
    async fn unregistered_candidates_are_skipped_without_attempt() {
        let b = MockProvider::new("b");
        let reg = registry(&[("b", b.clone())]);
        let cascade = Cascade::new(QualityFilter::default(), CascadeSettings::default());
        let prompt = Prompt::new("Is wind power good?").unwrap();

        let outcome = cascade.run(&reg, &prompt, &ids(&["ghost", "b"])).await;
        assert_eq!(outcome.accepted.unwrap().provider, "b");
        assert_eq!(outcome.attempts.len(), 1);
        assert_eq!(outcome.attempts[0].provider, "b");
    }

    #[tokio::test]
    async fn empty_candidate_list_is_exhausted() {
        let reg = registry(&[("b", MockProvider::new("b"))]);
        let cascade = Cascade::new(QualityFilter::default(), CascadeSettings::default());
        let prompt = Prompt::new("anything").unwrap();
        let outcome = cascade.run(&reg, &prompt, &[]).await;
        assert!(outcome.accepted.is_none());
        assert!(outcome.attempts.is_empty());
    }

    #[tokio::test]
    async fn adapter_receives_trimmed_prompt_and_token_limit() {
        let a = MockProvider::new("a");
        let reg = registry(&[("a", a.clone())]);
        let settings = CascadeSettings {
            max_tokens: 42,
            call_timeout: Duration::from_secs(5),
        };
        let cascade = Cascade::new(QualityFilter::default(), settings);
        let prompt = Prompt::new("  hello wind  ").unwrap();
        cascade.run(&reg, &prompt, &ids(&["a"])).await;
        assert_eq!(a.prompts().await, vec!["hello wind".to_string()]);
        assert_eq!(cascade.settings().max_tokens, 42);
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(outcome_label(&AttemptOutcome::Accepted), "accepted");
        assert_eq!(
            outcome_label(&AttemptOutcome::Rejected { reason: "x".into() }),
            "rejected"
        );
    }
}
