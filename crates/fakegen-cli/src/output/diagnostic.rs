//! Miette diagnostic wrapper for problems found in data file expressions.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use fakegen::ParseError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for one expression in a data file.
///
/// The source shown is the expression itself, named after the file and key
/// it came from.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(fakegen::check))]
pub struct ExpressionDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: Option<SourceSpan>,

    message: String,

    #[help]
    help: Option<String>,
}

impl ExpressionDiagnostic {
    /// Create a diagnostic from a ParseError, pointing at the failed character.
    pub fn from_parse_error(origin: &str, expression: &str, err: &ParseError) -> Self {
        let (line, column, message) = match err {
            ParseError::Syntax {
                line,
                column,
                message,
            } => (*line, *column, format!("syntax error: {}", message)),
            ParseError::UnexpectedEof { line, column } => {
                (*line, *column, "unexpected end of expression".to_string())
            }
        };

        // Columns count characters; spans count bytes.
        let line_start: usize = expression
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum();
        let offset = expression[line_start..]
            .char_indices()
            .nth(column.saturating_sub(1))
            .map_or(expression.len(), |(i, _)| line_start + i);

        ExpressionDiagnostic {
            src: NamedSource::new(origin, expression.to_string()),
            span: Some((offset, 1).into()),
            message,
            help: Some("directives look like #{name 'arg', ...} or #{Provider.method}".to_string()),
        }
    }

    /// Create a diagnostic for a problem with the expression as a whole.
    pub fn from_message(origin: &str, expression: &str, message: impl Into<String>) -> Self {
        ExpressionDiagnostic {
            src: NamedSource::new(origin, expression.to_string()),
            span: None,
            message: message.into(),
            help: None,
        }
    }

    /// The one-line description of the problem.
    pub fn message(&self) -> &str {
        &self.message
    }
}
