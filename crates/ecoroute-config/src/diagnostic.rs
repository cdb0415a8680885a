// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with fuzzy match suggestions.
//!
//! Converts Figment deserialization errors into miette diagnostics with
//! source spans, valid key listings, and "did you mean?" suggestions using
//! Jaro-Winkler string similarity.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(ecoroute::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// The unrecognized key name.
        key: String,
        /// Suggested correction via fuzzy matching, if any.
        suggestion: Option<String>,
        /// Valid keys for the section, comma separated.
        valid_keys: String,
        /// Source span for the offending key.
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        /// The source file content for context display.
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(ecoroute::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// An enum-valued key (gate kind, backend, category) has an unknown variant.
    #[error("unknown value `{value}` for key `{key}`")]
    #[diagnostic(
        code(ecoroute::config::unknown_variant),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_values))
    )]
    UnknownVariant {
        key: String,
        value: String,
        suggestion: Option<String>,
        valid_values: String,
    },

    /// A required configuration key is missing.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(ecoroute::config::missing_key),
        help("add `{key} = <value>` to your ecoroute.toml")
    )]
    MissingKey { key: String },

    /// A semantic validation failure.
    #[error("validation error: {message}")]
    #[diagnostic(code(ecoroute::config::validation))]
    Validation { message: String },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(ecoroute::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid values: {valid}"),
        None => format!("valid values: {valid}"),
    }
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// A figment error may carry several underlying errors; each becomes one
/// diagnostic.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| {
            let key = dotted_path(&error);
            match &error.kind {
                Kind::UnknownField(field, expected) => {
                    let valid_keys: Vec<&str> = expected.to_vec();
                    let (span, src) = find_source_span(&error, field, toml_sources);
                    ConfigError::UnknownKey {
                        key: field.clone(),
                        suggestion: suggest_key(field, &valid_keys),
                        valid_keys: valid_keys.join(", "),
                        span,
                        src,
                    }
                }
                Kind::UnknownVariant(value, expected) => {
                    let valid: Vec<&str> = expected.to_vec();
                    ConfigError::UnknownVariant {
                        key,
                        value: value.clone(),
                        suggestion: suggest_key(value, &valid),
                        valid_values: valid.join(", "),
                    }
                }
                Kind::MissingField(field) => ConfigError::MissingKey {
                    key: if key.is_empty() {
                        field.to_string()
                    } else {
                        format!("{key}.{field}")
                    },
                },
                Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                    key,
                    detail: format!("found {actual}, expected {expected}"),
                    expected: expected.to_string(),
                },
                _ => ConfigError::Other(error.to_string()),
            }
        })
        .collect()
}

fn dotted_path(error: &figment::error::Error) -> String {
    error
        .path
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Find the source span of an unknown key in whichever TOML file it came from.
fn find_source_span(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let source_path = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    // Inline sources have no file metadata; fall back to the only source given.
    let source = match source_path {
        Some(path) => toml_sources.iter().find(|(p, _)| *p == path),
        None if toml_sources.len() == 1 => toml_sources.first(),
        None => None,
    };

    if let Some((path, content)) = source {
        let section: Vec<String> = error.path.iter().map(|s| s.to_string()).collect();
        if let Some(offset) = find_key_offset(content, &section, field) {
            let span = SourceSpan::new(offset.into(), field.len());
            let named = NamedSource::new(path, content.clone());
            return (Some(span), Some(named));
        }
    }

    (None, None)
}

/// Find the byte offset of `field` in TOML content, searching after the
/// header of the first path segment.
///
/// Both table headers (`[routing]`) and array-of-table headers
/// (`[[providers]]`) are recognised. Array indices in the path are ignored,
/// so the first matching key after the header wins.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let search_start = match path.first() {
        None => 0,
        Some(section) => {
            let array_header = format!("[[{section}]]");
            let table_header = format!("[{section}]");
            content
                .find(&array_header)
                .map(|pos| pos + array_header.len())
                .or_else(|| content.find(&table_header).map(|pos| pos + table_header.len()))?
        }
    };

    let mut byte_offset = search_start;
    for line in content[search_start..].split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(after) = trimmed.strip_prefix(field)
            && (after.starts_with(' ') || after.starts_with('=') || after.starts_with('\t'))
        {
            return Some(byte_offset + (line.len() - trimmed.len()));
        }
        byte_offset += line.len();
    }

    None
}

/// Suggest a similar key name using Jaro-Winkler string similarity.
///
/// Returns the best match above the similarity threshold, or `None`.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|&key| (key, strsim::jaro_winkler(unknown, key)))
        .filter(|&(_, score)| score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(key, _)| key.to_string())
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}
