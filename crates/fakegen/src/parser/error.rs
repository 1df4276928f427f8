//! Parse error types for directive expressions and regex patterns.

use thiserror::Error;
use winnow::error::{ContextError, ErrMode};

/// An error that occurred during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A syntax error with location information.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// Unexpected end of input.
    #[error("unexpected end of input at {line}:{column}")]
    UnexpectedEof { line: usize, column: usize },
}

impl ParseError {
    /// Build a syntax error positioned where `remaining` starts inside `original`.
    pub(crate) fn at(original: &str, remaining: &str, message: impl Into<String>) -> Self {
        let (line, column) = calculate_position(original, remaining);
        ParseError::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    /// Column of the error, 1-based.
    pub fn column(&self) -> usize {
        match self {
            ParseError::Syntax { column, .. } | ParseError::UnexpectedEof { column, .. } => {
                *column
            }
        }
    }
}

/// Render a winnow error as a one-line message naming the failed construct.
pub(crate) fn describe(error: &ErrMode<ContextError>) -> String {
    match error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => {
            let message = e.to_string().replace('\n', ", ");
            if message.is_empty() {
                "unexpected input".to_string()
            } else {
                message
            }
        }
        ErrMode::Incomplete(_) => "unexpected end of input".to_string(),
    }
}

/// Calculate line and column from original input and remaining input.
pub(crate) fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len().saturating_sub(remaining.len());
    let consumed_str = original.get(..consumed).unwrap_or(original);
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let column = match consumed_str.rfind('\n') {
        Some(pos) => consumed_str[pos + 1..].chars().count() + 1,
        None => consumed_str.chars().count() + 1,
    };
    (line, column)
}
