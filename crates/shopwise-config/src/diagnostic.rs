// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns figment extraction failures into miette diagnostics.
//!
//! Unknown keys get a "did you mean" hint (Jaro-Winkler similarity) and, when
//! the offending file can be found, a source span pointing at the key.

// The Diagnostic derive assigns fields it never reads back.
#![allow(unused_assignments)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Similarity a valid key needs before it is offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// One problem found while loading `shopwise.toml`.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// Key not recognized by the section it appears in.
    #[error("unrecognized key `{key}`")]
    #[diagnostic(
        code(shopwise::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// Dotted path of the unrecognized key, e.g. `server.prot`.
        key: String,
        suggestion: Option<String>,
        /// Comma-separated keys accepted in that section.
        valid_keys: String,
        #[label("unrecognized here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// Value present but of the wrong shape.
    #[error("`{key}` has the wrong type: {detail}")]
    #[diagnostic(code(shopwise::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    #[error("`{key}` is required")]
    #[diagnostic(
        code(shopwise::config::missing_key),
        help("add `{key} = <value>` to your shopwise.toml")
    )]
    MissingKey { key: String },

    /// A value parsed but failed a semantic check.
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(shopwise::config::validation))]
    Validation { message: String },

    #[error("could not load configuration: {0}")]
    #[diagnostic(code(shopwise::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, accepted: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Accepted here: {accepted}"),
        None => format!("accepted here: {accepted}"),
    }
}

/// Split a figment failure into one [`ConfigError`] per underlying problem.
///
/// `sources` pairs each loaded file path with its text so unknown keys can
/// be pointed at.
pub fn figment_to_config_errors(
    err: figment::Error,
    sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| {
            let section: Vec<String> = error.path.iter().map(ToString::to_string).collect();
            match &error.kind {
                Kind::UnknownField(field, accepted) => {
                    let (span, src) = locate_key(&error, &section, field, sources);
                    ConfigError::UnknownKey {
                        key: dotted(&section, field),
                        suggestion: suggest_key(field, *accepted),
                        valid_keys: accepted.join(", "),
                        span,
                        src,
                    }
                }
                Kind::MissingField(field) => ConfigError::MissingKey {
                    key: dotted(&section, field),
                },
                Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                    key: section.join("."),
                    detail: format!("got {actual}"),
                    expected: expected.to_string(),
                },
                _ => ConfigError::Other(error.to_string()),
            }
        })
        .collect()
}

fn dotted(section: &[String], field: &str) -> String {
    if section.is_empty() {
        field.to_string()
    } else {
        format!("{}.{field}", section.join("."))
    }
}

type Located = (Option<SourceSpan>, Option<NamedSource<String>>);

fn locate_key(
    error: &figment::Error,
    section: &[String],
    field: &str,
    sources: &[(String, String)],
) -> Located {
    let origin = match error.metadata.as_ref().and_then(|meta| meta.source.as_ref()) {
        Some(figment::Source::File(file)) => Some(file.display().to_string()),
        _ => None,
    };

    // Inline strings carry no file source; fall back to the only source given.
    let source = match origin {
        Some(file) => sources.iter().find(|(p, _)| *p == file),
        None if sources.len() == 1 => sources.first(),
        None => None,
    };

    if let Some((path, content)) = source
        && let Some(offset) = find_key_offset(content, section, field)
    {
        return (
            Some((offset, field.len()).into()),
            Some(NamedSource::new(path, content.clone())),
        );
    }

    (None, None)
}

/// Byte offset of `field` in TOML `content`, searching after the `[section]`
/// header when `path` is non-empty.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let start = match path.first() {
        None => 0,
        Some(table) => {
            let heading = format!("[{table}]");
            content.find(&heading)? + heading.len()
        }
    };

    let mut byte_offset = start;
    for line in content[start..].split_inclusive('\n') {
        let body = line.trim_start();
        if body.starts_with('[') && byte_offset != start {
            // Next section reached.
            return None;
        }
        if let Some(rest) = body.strip_prefix(field)
            && rest.trim_start().starts_with('=')
        {
            return Some(byte_offset + (line.len() - body.len()));
        }
        byte_offset += line.len();
    }

    None
}

/// Best valid key above the similarity threshold, if any.
pub fn suggest_key<S: AsRef<str>>(unknown: &str, candidates: &[S]) -> Option<String> {
    candidates
        .iter()
        .map(|key| (key.as_ref(), strsim::jaro_winkler(unknown, key.as_ref())))
        .filter(|&(_, score)| score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(key, _)| key.to_string())
}

/// Graphical report for each error, concatenated.
pub fn render_errors_to_string(errors: &[ConfigError]) -> String {
    let handler = miette::GraphicalReportHandler::new();
    errors
        .iter()
        .map(|error| {
            let mut report = String::new();
            match handler.render_report(&mut report, error as &dyn Diagnostic) {
                Ok(()) => report,
                Err(_) => format!("error: {error}\n"),
            }
        })
        .collect()
}

/// Print [`render_errors_to_string`] output to stderr.
pub fn render_errors(errors: &[ConfigError]) {
    eprint!("{}", render_errors_to_string(errors));
}
