//! Parsers for directive expressions and regex-subset patterns.
//!
//! Both parsers produce public ASTs that the interpreter walks and that
//! external tooling (such as `fakegen check`) can inspect.

pub mod ast;
pub mod error;
mod expression;
mod regex;

pub use ast::*;
pub use error::ParseError;
pub use expression::{DIRECTIVE_OPEN, has_directive, parse_expression};
pub use regex::{MAX_EXPANSION, MAX_REPETITION, UNBOUNDED_REPEAT_CAP, parse_regex};
