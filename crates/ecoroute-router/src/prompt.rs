// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt normalization.
//!
//! A prompt is trimmed once on entry. The token count is the number of
//! whitespace-separated segments, a cheap proxy rather than a tokenizer.

use std::collections::BTreeSet;

use ecoroute_core::{Category, EcorouteError};

use crate::keywords;

/// A trimmed, non-empty prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    text: String,
    token_count: usize,
}

impl Prompt {
    /// Normalize raw input. Empty or whitespace-only input is rejected.
    pub fn new(raw: &str) -> Result<Self, EcorouteError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(EcorouteError::EmptyInput);
        }
        Ok(Self {
            text: text.to_string(),
            token_count: token_count(text),
        })
    }

    /// The trimmed prompt text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }

    /// Classify the prompt and bundle the features the gates and scorer read.
    pub fn features(&self) -> PromptFeatures {
        PromptFeatures {
            token_count: self.token_count,
            categories: keywords::classify(&self.text),
        }
    }
}

/// Number of whitespace-separated segments in `text`.
pub fn token_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Everything the capability gates and the scorer need to know about a prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptFeatures {
    pub token_count: usize,
    pub categories: BTreeSet<Category>,
}

impl PromptFeatures {
    pub fn has(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    pub fn has_any(&self, categories: &[Category]) -> bool {
        categories.iter().any(|c| self.categories.contains(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_counts_words() {
        let p = Prompt::new("  what is   solar power?\n").unwrap();
        assert_eq!(p.text(), "what is   solar power?");
        assert_eq!(p.token_count(), 4);
    }

    #[test]
    fn empty_prompt_is_rejected() {
        assert!(matches!(Prompt::new(""), Err(EcorouteError::EmptyInput)));
        assert!(matches!(Prompt::new(" \t\n "), Err(EcorouteError::EmptyInput)));
    }

    #[test]
    fn features_carry_categories() {
        let f = Prompt::new("Write a python function").unwrap().features();
        assert_eq!(f.token_count, 4);
        assert!(f.has(Category::Coding));
        assert!(f.has(Category::Creative));
        assert!(!f.has(Category::Math));
        assert!(f.has_any(&[Category::Math, Category::Coding]));
    }
}
