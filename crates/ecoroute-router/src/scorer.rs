// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic complexity scoring.
//!
//! Sums a fixed weight per matched keyword category and adds a bonus for
//! long prompts. No model call, no network.

use std::collections::BTreeSet;

use ecoroute_core::Category;
use serde::Serialize;

use crate::prompt::{Prompt, PromptFeatures};

/// Score contribution of one matched category.
pub fn weight(category: Category) -> u32 {
    match category {
        Category::Reasoning => 2,
        Category::Coding => 3,
        Category::Technical => 3,
        Category::Math => 3,
        Category::Creative => 3,
        Category::Procedural => 2,
        Category::Elaboration => 4,
        Category::Conjunction => 1,
    }
}

/// Categories scored as one group: any number of them adds a single weight.
pub const SHARED_WEIGHT: &[Category] = &[Category::Coding, Category::Technical];

/// Bonus for long prompts: +1 above 50 tokens, +2 above 100.
pub fn length_bonus(token_count: usize) -> u32 {
    match token_count {
        0..=50 => 0,
        51..=100 => 1,
        _ => 2,
    }
}

/// Classification and score for one prompt, as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    pub complexity_score: u32,
    pub categories: BTreeSet<Category>,
    pub token_count: usize,
}

/// Stateless complexity scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexityScorer;

impl ComplexityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score already-extracted features.
    pub fn score(&self, features: &PromptFeatures) -> u32 {
        let ungrouped: u32 = features
            .categories
            .iter()
            .filter(|c| !SHARED_WEIGHT.contains(c))
            .map(|&c| weight(c))
            .sum();
        let grouped = if features.has_any(SHARED_WEIGHT) {
            weight(Category::Coding)
        } else {
            0
        };
        ungrouped + grouped + length_bonus(features.token_count)
    }

    /// Classify and score a prompt in one step.
    pub fn report(&self, prompt: &Prompt) -> ScoreReport {
        let features = prompt.features();
        ScoreReport {
            complexity_score: self.score(&features),
            categories: features.categories,
            token_count: features.token_count,
        }
    }
}
