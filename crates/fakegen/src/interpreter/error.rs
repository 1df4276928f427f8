//! Error types for the fakegen interpreter.

use std::io;
use std::path::PathBuf;

use strsim::levenshtein;
use thiserror::Error;

use crate::parser::ParseError;

/// Errors that occur while configuring a [`Faker`](crate::Faker): bad locale
/// identifiers and unreadable or malformed data sources.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a data source.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The data source is not a valid locale data document.
    #[error("{path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The locale identifier could not be parsed.
    #[error("invalid locale '{locale}': {message}")]
    InvalidLocale { locale: String, message: String },
}

/// An error that occurred while generating a value.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Malformed regex-subset pattern.
    #[error("invalid pattern '{pattern}': {source}")]
    PatternSyntax {
        pattern: String,
        #[source]
        source: ParseError,
    },

    /// Malformed `#{...}` directive syntax.
    #[error("invalid expression '{expression}': {source}")]
    DirectiveSyntax {
        expression: String,
        #[source]
        source: ParseError,
    },

    /// Directive names a builtin that does not exist.
    #[error("unknown builtin '{name}'{}", format_suggestions(suggestions))]
    UnknownBuiltin {
        name: String,
        suggestions: Vec<String>,
    },

    /// Directive names a provider that is not registered.
    #[error("unknown provider '{name}'{}", format_suggestions(suggestions))]
    UnknownProvider {
        name: String,
        suggestions: Vec<String>,
    },

    /// Provider exists but cannot produce the requested method.
    #[error("provider '{provider}' has no method '{method}'")]
    UnknownMethod { provider: String, method: String },

    /// Wrong number of arguments passed to a directive.
    #[error("'{directive}' expects {expected} arguments, got {got}")]
    ArgumentCount {
        directive: String,
        expected: String,
        got: usize,
    },

    /// Maximum directive nesting depth exceeded.
    #[error("maximum recursion depth {limit} exceeded: {}", chain.join(" -> "))]
    MaxDepthExceeded { limit: usize, chain: Vec<String> },

    /// Dotted key is absent from every locale in the chain.
    #[error("key '{key}' not found in locales [{}]", chain.join(", "))]
    KeyNotFound { key: String, chain: Vec<String> },

    /// Argument rejected by a generator or the random service.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl EvalError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        EvalError::InvalidArgument {
            message: message.into(),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

/// Return up to three names from `available` that are close to `key`.
///
/// Keys of three characters or fewer allow an edit distance of 1, longer keys
/// allow 2. Results are ordered closest first, then alphabetically.
pub fn compute_suggestions(key: &str, available: &[String]) -> Vec<String> {
    let max_distance = if key.chars().count() <= 3 { 1 } else { 2 };
    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .map(|candidate| (levenshtein(key, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort();
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}
