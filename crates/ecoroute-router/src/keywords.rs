// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Categorized keyword table and whole-word classifier.
//!
//! One table feeds both the capability gates and the complexity scorer.
//! Matching is case-insensitive and anchored on word boundaries, so
//! `sum` matches "the sum of" but not "summary".

use std::collections::BTreeSet;
use std::sync::LazyLock;

use ecoroute_core::Category;
use regex::Regex;

/// Keywords per category.
pub fn keywords(category: Category) -> &'static [&'static str] {
    match category {
        Category::Reasoning => &[
            "explain", "analyze", "analyse", "compare", "contrast", "evaluate", "critique",
            "discuss", "describe", "define",
        ],
        Category::Coding => &[
            "code", "function", "script", "python", "javascript", "programming", "algorithm",
            "compile", "debug",
        ],
        Category::Technical => &["technical", "scientific", "research"],
        Category::Math => &[
            "solve", "integrate", "differentiate", "derivative", "roots", "limit", "equation",
            "equations", "system of equations", "calculate", "compute", "find", "formula", "math",
            "statistics", "probability", "sum", "product", "factorial", "prime", "number",
        ],
        Category::Creative => &[
            "write", "create", "generate", "compose", "design", "imagine", "story", "poem",
            "essay",
        ],
        Category::Procedural => &[
            "step", "steps", "process", "how to", "tutorial", "guide", "instructions",
        ],
        Category::Elaboration => &[
            "detailed", "comprehensive", "thorough", "in-depth", "extensive", "policy",
            "recommendations", "analysis",
        ],
        Category::Conjunction => &["and", "also", "additionally", "furthermore", "moreover", "plus"],
    }
}

/// Inline arithmetic such as `2+2`, `3 * 4` or `10/5`. Minus is left out so
/// dates and ranges ("2020-2024") do not count as math.
static ARITHMETIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d\s*[+*/^×÷]\s*\d").unwrap());

static PATTERNS: LazyLock<Vec<(Category, Regex)>> = LazyLock::new(|| {
    Category::ALL
        .iter()
        .map(|&category| {
            let alternation = keywords(category)
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"(?i)\b(?:{alternation})\b");
            (category, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// Return every category whose keywords occur in `text`.
pub fn classify(text: &str) -> BTreeSet<Category> {
    let mut matched: BTreeSet<Category> = PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(category, _)| *category)
        .collect();
    if ARITHMETIC.is_match(text) {
        matched.insert(Category::Math);
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats(text: &str) -> Vec<Category> {
        classify(text).into_iter().collect()
    }

    #[test]
    fn whole_word_only() {
        assert!(!classify("give me a summary").contains(&Category::Math));
        assert!(classify("what is the sum of these").contains(&Category::Math));
        assert!(!classify("encoded data").contains(&Category::Coding));
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(cats("EXPLAIN"), vec![Category::Reasoning]);
        assert_eq!(cats("Python"), vec![Category::Coding]);
    }

    #[test]
    fn multi_word_keywords() {
        assert!(classify("How to bake bread").contains(&Category::Procedural));
        assert!(classify("solve this system of equations").contains(&Category::Math));
        assert!(classify("an in-depth review").contains(&Category::Elaboration));
    }

    #[test]
    fn inline_arithmetic_is_math() {
        assert_eq!(cats("What is 2+2?"), vec![Category::Math]);
        assert!(classify("what's 3 * 4").contains(&Category::Math));
        assert!(!classify("between 2020-2024").contains(&Category::Math));
    }

    #[test]
    fn find_is_a_math_keyword() {
        assert_eq!(cats("Find x if 3x = 12"), vec![Category::Math]);
        assert!(!classify("findings from the survey").contains(&Category::Math));
    }

    #[test]
    fn plain_question_has_no_categories() {
        assert!(classify("What is renewable energy?").is_empty());
    }

    #[test]
    fn several_categories_at_once() {
        let c = classify("Explain and write a python script");
        assert!(c.contains(&Category::Reasoning));
        assert!(c.contains(&Category::Conjunction));
        assert!(c.contains(&Category::Creative));
        assert!(c.contains(&Category::Coding));
        assert_eq!(c.len(), 4);
    }

    #[test]
    fn every_category_has_keywords() {
        for category in Category::ALL {
            assert!(!keywords(category).is_empty(), "{category} has no keywords");
        }
    }
}
