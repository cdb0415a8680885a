// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response cleanup applied before the quality filter.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Leading list marker such as `1.` or `2)`.
static ENUMERATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+[.)]\s*").unwrap());

/// Drop repeated lines, keeping the first occurrence in place.
///
/// Two lines repeat when they are equal after trimming and removing a
/// leading list marker, so `"1. Sun"` and `"2. Sun"` collapse to the first.
/// Blank lines carry no dedup key, so every blank line is kept, repeated
/// ones included, except at the very end. Emitted lines lose trailing
/// whitespace only.
/// Applying this twice gives the same text as applying it once.
pub fn collapse_duplicate_lines(text: &str) -> String {
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            kept.push("");
            continue;
        }
        let stripped = ENUMERATION.replace(trimmed, "");
        let key = if stripped.is_empty() {
            trimmed.to_string()
        } else {
            stripped.into_owned()
        };
        if seen.insert(key) {
            kept.push(line.trim_end());
        }
    }

    while kept.last() == Some(&"") {
        kept.pop();
    }

    kept.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_duplicates_collapse() {
        assert_eq!(collapse_duplicate_lines("1. Sun\n2. Sun\nMoon"), "1. Sun\nMoon");
    }

    #[test]
    fn idempotent_on_numbered_list() {
        let once = collapse_duplicate_lines("1. Sun\n2. Sun\nMoon");
        assert_eq!(collapse_duplicate_lines(&once), once);
    }

    #[test]
    fn plain_repeats_collapse() {
        let text = "Solar is clean.\nSolar is clean.\n  Solar is clean.  \nWind too.";
        assert_eq!(collapse_duplicate_lines(text), "Solar is clean.\nWind too.");
    }

    #[test]
    fn blank_lines_are_kept() {
        let once = collapse_duplicate_lines("a b\n\nc d\n\n");
        assert_eq!(once, "a b\n\nc d");
        assert_eq!(collapse_duplicate_lines(&once), once);
    }

    #[test]
    fn repeated_blank_lines_are_not_collapsed() {
        let text = "Wind\n\n\nSolar\n\nWind";
        assert_eq!(collapse_duplicate_lines(text), "Wind\n\n\nSolar");
    }

    #[test]
    fn parenthesis_marker_counts_as_enumeration() {
        assert_eq!(collapse_duplicate_lines("1) wind\nwind\n3) water"), "1) wind\n3) water");
    }

    #[test]
    fn bare_marker_lines_are_distinct() {
        assert_eq!(collapse_duplicate_lines("1.\n2.\n1."), "1.\n2.");
    }

    #[test]
    fn leading_indentation_is_preserved() {
        assert_eq!(collapse_duplicate_lines("  - item   \n  - item"), "  - item");
    }

    mod properties {
        use super::super::collapse_duplicate_lines;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn collapsing_is_idempotent(lines in prop::collection::vec("[ a-c0-9.)]{0,6}", 0..12)) {
                let once = collapse_duplicate_lines(&lines.join("\n"));
                prop_assert_eq!(collapse_duplicate_lines(&once), once);
            }

            #[test]
            fn output_never_has_more_lines(lines in prop::collection::vec("[ a-c0-9.)]{0,6}", 0..12)) {
                let text = lines.join("\n");
                let out = collapse_duplicate_lines(&text);
                prop_assert!(out.lines().count() <= text.lines().count());
            }
        }
    }
}
