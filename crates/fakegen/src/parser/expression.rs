//! Expression parser using winnow.
//!
//! Parses expression strings into an AST. Handles:
//! - Literal text (a `#` not followed by `{` and a bare `}` are literal)
//! - Builtin directives: `#{numerify '###'}`
//! - Provider references: `#{Name.first_name}`, `#{Number.number_between '1','10'}`
//! - Single-quoted arguments with `\'` escapes; other backslashes are kept
//! - Unquoted nested directives as arguments: `#{examplify #{Name.last_name}}`

use winnow::combinator::{alt, cut_err, delimited, not, opt, preceded, repeat, separated, terminated};
use winnow::error::{StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{none_of, take_while};

use super::ast::{Argument, Directive, Segment, Template};
use super::error::{ParseError, calculate_position, describe};

/// Opening marker of a directive.
pub const DIRECTIVE_OPEN: &str = "#{";

/// Parse an expression string into an AST.
pub fn parse_expression(input: &str) -> Result<Template, ParseError> {
    let mut remaining = input;
    match template(&mut remaining) {
        Ok(t) => {
            if remaining.is_empty() {
                Ok(t)
            } else {
                Err(ParseError::at(
                    input,
                    remaining,
                    format!(
                        "unexpected character: '{}'",
                        remaining.chars().next().unwrap_or('?')
                    ),
                ))
            }
        }
        Err(_) if remaining.is_empty() => {
            let (line, column) = calculate_position(input, remaining);
            Err(ParseError::UnexpectedEof { line, column })
        }
        Err(e) => Err(ParseError::at(input, remaining, describe(&e))),
    }
}

/// True if `text` contains a directive marker and needs evaluation.
pub fn has_directive(text: &str) -> bool {
    text.contains(DIRECTIVE_OPEN)
}

/// Parse a complete expression into segments.
fn template(input: &mut &str) -> ModalResult<Template> {
    let segments: Vec<Segment> = repeat(0.., segment).parse_next(input)?;
    Ok(Template {
        segments: merge_literals(segments),
    })
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

/// Parse a single segment (directive or literal character).
fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((directive.map(Segment::Directive), literal_char)).parse_next(input)
}

/// Parse a single literal character: anything except the start of `#{`.
fn literal_char(input: &mut &str) -> ModalResult<Segment> {
    alt((terminated('#', not('{')), none_of(['#'])))
        .map(|c: char| Segment::Literal(c.to_string()))
        .parse_next(input)
}

/// Parse `#{ body }`. Once the opening marker is seen, failures are fatal.
fn directive(input: &mut &str) -> ModalResult<Directive> {
    DIRECTIVE_OPEN.parse_next(input)?;
    cut_err(terminated(directive_body, (ws, '}')))
        .context(StrContext::Label("directive"))
        .context(StrContext::Expected(StrContextValue::CharLiteral('}')))
        .parse_next(input)
}

/// Parse `name args?` or `Provider.method.key args?`.
fn directive_body(input: &mut &str) -> ModalResult<Directive> {
    ws(input)?;
    let path: Vec<&str> = separated(1.., identifier, '.')
        .context(StrContext::Expected(StrContextValue::Description(
            "a builtin name or Provider.method",
        )))
        .parse_next(input)?;
    let args: Vec<Argument> = opt(preceded(ws, arguments))
        .parse_next(input)?
        .unwrap_or_default();

    let directive = match path.split_first() {
        Some((provider, rest)) if !rest.is_empty() => Directive::Provider {
            provider: (*provider).to_string(),
            method: rest.join("."),
            args,
        },
        _ => Directive::Builtin {
            name: path.concat(),
            args,
        },
    };
    Ok(directive)
}

/// Parse `arg (, arg)*`.
fn arguments(input: &mut &str) -> ModalResult<Vec<Argument>> {
    separated(1.., argument, (ws, ',', ws)).parse_next(input)
}

/// Parse a quoted literal or a nested directive.
fn argument(input: &mut &str) -> ModalResult<Argument> {
    alt((
        quoted.map(Argument::Literal),
        directive.map(|d| Argument::Nested(Box::new(d))),
    ))
    .parse_next(input)
}

/// Parse `'text'`, where `\'` is an escaped quote.
fn quoted(input: &mut &str) -> ModalResult<String> {
    delimited(
        '\'',
        repeat(0.., quoted_char),
        cut_err('\'')
            .context(StrContext::Label("argument"))
            .context(StrContext::Expected(StrContextValue::CharLiteral('\''))),
    )
    .parse_next(input)
}

fn quoted_char(input: &mut &str) -> ModalResult<char> {
    alt(("\\'".value('\''), none_of(['\'']))).parse_next(input)
}

/// Parse an identifier (letters, digits, underscore).
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., char::is_whitespace).void().parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_without_brace_is_literal() {
        let t = parse_expression("# 1 #x }").unwrap();
        assert_eq!(t.segments, vec![Segment::Literal("# 1 #x }".into())]);
    }

    #[test]
    fn nested_argument_is_parsed() {
        let t = parse_expression("#{examplify #{Name.last_name}}").unwrap();
        let Segment::Directive(Directive::Builtin { name, args }) = &t.segments[0] else {
            panic!("expected builtin");
        };
        assert_eq!(name, "examplify");
        assert!(matches!(&args[0], Argument::Nested(_)));
    }

    #[test]
    fn unterminated_directive_is_eof() {
        assert_eq!(
            parse_expression("ab #{numerify '#'"),
            Err(ParseError::UnexpectedEof { line: 1, column: 18 })
        );
        assert!(matches!(
            parse_expression("#{numerify 'x"),
            Err(ParseError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn stray_text_in_directive_is_positioned() {
        let err = parse_expression("#{numerify '#' x}").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { column: 16, .. }), "{err:?}");
    }

    #[test]
    fn provider_path_and_arguments() {
        let t = parse_expression("#{Number.number_between '1', '10'}").unwrap();
        assert_eq!(
            t.segments,
            vec![Segment::Directive(Directive::Provider {
                provider: "Number".into(),
                method: "number_between".into(),
                args: vec![Argument::Literal("1".into()), Argument::Literal("10".into())],
            })]
        );
    }

    #[test]
    fn has_directive_detects_marker() {
        assert!(has_directive("a #{b}"));
        assert!(!has_directive("a # {b}"));
    }
}
