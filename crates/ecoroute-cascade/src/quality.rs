// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic response quality filter.
//!
//! Rules run in a fixed order and the first one that fires rejects the
//! response. Every comparison is case-insensitive.

use std::sync::LazyLock;

use ecoroute_config::model::QualityConfig;
use regex::Regex;

/// Result of checking one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject { rule: &'static str, reason: String },
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }
}

/// One unhelpfulness heuristic.
pub trait QualityRule: Send + Sync {
    /// Stable rule name reported in rejections.
    fn name(&self) -> &'static str;

    /// Return a reason when the response should be rejected.
    fn check(&self, prompt: &str, response: &str) -> Option<String>;
}

/// Rejects empty or whitespace-only text.
pub struct EmptyResponse;

impl QualityRule for EmptyResponse {
    fn name(&self) -> &'static str {
        "empty"
    }

    fn check(&self, _prompt: &str, response: &str) -> Option<String> {
        response
            .trim()
            .is_empty()
            .then(|| "response is empty".to_string())
    }
}

/// Rejects a response that only repeats the prompt.
pub struct EchoesPrompt;

impl QualityRule for EchoesPrompt {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn check(&self, prompt: &str, response: &str) -> Option<String> {
        (normalize(prompt) == normalize(response))
            .then(|| "response repeats the prompt".to_string())
    }
}

/// Anything that is neither a word character nor whitespace, in any script.
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Lowercase, drop punctuation, collapse whitespace.
fn normalize(text: &str) -> String {
    let cleaned = NON_WORD.replace_all(text, "").to_lowercase();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rejects responses shorter than `min_words`.
pub struct TooFewWords {
    pub min_words: usize,
}

impl QualityRule for TooFewWords {
    fn name(&self) -> &'static str {
        "too_short"
    }

    fn check(&self, _prompt: &str, response: &str) -> Option<String> {
        let words = response.split_whitespace().count();
        (words < self.min_words)
            .then(|| format!("{words} words, at least {} required", self.min_words))
    }
}

/// Rejects text carrying a provider error marker.
pub struct ErrorMarker {
    markers: Vec<String>,
}

impl ErrorMarker {
    pub fn new(markers: &[String]) -> Self {
        Self {
            markers: markers
                .iter()
                .map(|m| m.to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }
}

impl QualityRule for ErrorMarker {
    fn name(&self) -> &'static str {
        "error_marker"
    }

    fn check(&self, _prompt: &str, response: &str) -> Option<String> {
        let lower = response.to_lowercase();
        self.markers
            .iter()
            .find(|m| lower.contains(m.as_str()))
            .map(|m| format!("response contains error marker `{m}`"))
    }
}

/// Rejects list-of-credits output where every line mentions "by".
pub struct AttributionStub;

impl QualityRule for AttributionStub {
    fn name(&self) -> &'static str {
        "attribution_stub"
    }

    fn check(&self, _prompt: &str, response: &str) -> Option<String> {
        let mut lines = response.lines().filter(|l| !l.trim().is_empty()).peekable();
        lines.peek()?;
        lines
            .all(|l| l.to_lowercase().contains("by"))
            .then(|| "every line is an attribution".to_string())
    }
}

/// Rejects a model restating the instruction instead of following it.
pub struct WritePoemEcho;

impl QualityRule for WritePoemEcho {
    fn name(&self) -> &'static str {
        "write_poem"
    }

    fn check(&self, _prompt: &str, response: &str) -> Option<String> {
        let lower = response.to_lowercase();
        (lower.contains("write") && lower.contains("poem"))
            .then(|| "response restates a poem request".to_string())
    }
}

/// Rejects poem answers that miss every expected topic word.
pub struct PoemOffTopic {
    topic_words: Vec<String>,
}

impl PoemOffTopic {
    pub fn new(topic_words: &[String]) -> Self {
        Self {
            topic_words: topic_words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }
}

impl QualityRule for PoemOffTopic {
    fn name(&self) -> &'static str {
        "poem_off_topic"
    }

    fn check(&self, prompt: &str, response: &str) -> Option<String> {
        if self.topic_words.is_empty() || !prompt.to_lowercase().contains("poem") {
            return None;
        }
        let lower = response.to_lowercase();
        (!self.topic_words.iter().any(|w| lower.contains(w.as_str()))).then(|| {
            format!(
                "poem mentions none of {}",
                self.topic_words.join(", ")
            )
        })
    }
}

/// Ordered battery of quality rules.
pub struct QualityFilter {
    rules: Vec<Box<dyn QualityRule>>,
}

impl QualityFilter {
    pub fn with_rules(rules: Vec<Box<dyn QualityRule>>) -> Self {
        Self { rules }
    }

    /// The standard rule order, with switches and word lists from `[quality]`.
    pub fn from_config(config: &QualityConfig) -> Self {
        let mut rules: Vec<Box<dyn QualityRule>> = vec![
            Box::new(EmptyResponse),
            Box::new(EchoesPrompt),
            Box::new(TooFewWords {
                min_words: config.min_words,
            }),
            Box::new(ErrorMarker::new(&config.error_markers)),
        ];
        if config.reject_attribution_stubs {
            rules.push(Box::new(AttributionStub));
        }
        if config.reject_write_poem {
            rules.push(Box::new(WritePoemEcho));
        }
        if config.poem_topic_check {
            rules.push(Box::new(PoemOffTopic::new(&config.poem_topic_words)));
        }
        Self { rules }
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run the rules in order; the first rejection wins.
    pub fn evaluate(&self, prompt: &str, response: &str) -> Verdict {
        for rule in &self.rules {
            if let Some(reason) = rule.check(prompt, response) {
                return Verdict::Reject {
                    rule: rule.name(),
                    reason,
                };
            }
        }
        Verdict::Accept
    }
}

impl Default for QualityFilter {
    fn default() -> Self {
        Self::from_config(&QualityConfig::default())
    }
}

impl std::fmt::Debug for QualityFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QualityFilter")
            .field("rules", &self.rule_names())
            .finish()
    }
}
