//! Regex-subset parser using winnow.
//!
//! Supports literals and escapes, `.`, character classes with ranges and
//! negation, shorthands (`\d \w \s` and negations), alternation, groups,
//! `(?:...)`, quantifiers `? * +` and bounded repetition `{m}`, `{m,n}`,
//! `{m,}`. Anchors and word boundaries parse but generate nothing. Lookaround
//! and backreferences are rejected, as are patterns whose longest output
//! exceeds [`MAX_EXPANSION`] characters.

use winnow::combinator::{alt, cut_err, not, opt, preceded, repeat, separated};
use winnow::error::{StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, none_of, one_of, take_while};

use super::ast::{Atom, CharClass, ClassItem, Piece, RegexAst, Sequence, Shorthand};
use super::error::{ParseError, describe};

/// Extra repetitions allowed by `*`, `+` and `{m,}`.
pub const UNBOUNDED_REPEAT_CAP: u32 = 8;

/// Largest explicit repetition bound accepted in `{m,n}`.
pub const MAX_REPETITION: u32 = 1000;

/// Longest output, in characters, a pattern may generate.
pub const MAX_EXPANSION: u64 = 100_000;

/// Characters that cannot appear unescaped as literals.
const SPECIAL: [char; 12] = ['|', '(', ')', '[', '{', '*', '+', '?', '\\', '^', '$', '.'];

/// Parse a regex-subset pattern into an AST.
pub fn parse_regex(input: &str) -> Result<RegexAst, ParseError> {
    let mut remaining = input;
    match alternation(&mut remaining) {
        Ok(ast) => match remaining.chars().next() {
            None if ast.max_len() > MAX_EXPANSION => Err(ParseError::at(
                input,
                input,
                format!("invalid repetition, pattern can generate more than {MAX_EXPANSION} characters"),
            )),
            None => Ok(ast),
            Some(')') => Err(ParseError::at(input, remaining, "unmatched ')'")),
            Some(c @ ('*' | '+' | '?' | '{')) => Err(ParseError::at(
                input,
                remaining,
                format!("quantifier '{c}' has nothing to repeat"),
            )),
            Some(c) => Err(ParseError::at(
                input,
                remaining,
                format!("unexpected character: '{c}'"),
            )),
        },
        Err(e) => Err(ParseError::at(input, remaining, describe(&e))),
    }
}

/// Parse `seq ('|' seq)*`.
fn alternation(input: &mut &str) -> ModalResult<RegexAst> {
    separated(1.., sequence, '|')
        .map(|alternatives| RegexAst { alternatives })
        .parse_next(input)
}

/// Parse a possibly empty run of pieces.
fn sequence(input: &mut &str) -> ModalResult<Sequence> {
    repeat(0.., piece)
        .map(|pieces| Sequence { pieces })
        .parse_next(input)
}

/// Parse an atom with an optional quantifier.
fn piece(input: &mut &str) -> ModalResult<Piece> {
    let atom = atom(input)?;
    let (min, max) = opt(quantifier).parse_next(input)?.unwrap_or((1, 1));
    Ok(Piece { atom, min, max })
}

fn atom(input: &mut &str) -> ModalResult<Atom> {
    alt((
        group,
        class.map(Atom::Class),
        one_of(['^', '$']).value(Atom::Anchor),
        '.'.value(Atom::Any),
        escape,
        none_of(SPECIAL).map(Atom::Literal),
    ))
    .parse_next(input)
}

/// Parse `( ... )` or `(?: ... )`.
fn group(input: &mut &str) -> ModalResult<Atom> {
    '('.parse_next(input)?;
    let _ = opt(preceded(
        '?',
        cut_err(':')
            .context(StrContext::Label("group modifier"))
            .context(StrContext::Expected(StrContextValue::Description(
                "`?:` (lookaround is not supported)",
            ))),
    ))
    .parse_next(input)?;
    let inner = alternation(input)?;
    cut_err(')')
        .context(StrContext::Label("group"))
        .context(StrContext::Expected(StrContextValue::CharLiteral(')')))
        .parse_next(input)?;
    Ok(Atom::Group(inner))
}

/// Parse `[...]` or `[^...]`.
fn class(input: &mut &str) -> ModalResult<CharClass> {
    '['.parse_next(input)?;
    cut_err(class_body.verify(|class: &CharClass| !class.candidates().is_empty()))
        .context(StrContext::Label("character class"))
        .parse_next(input)
}

fn class_body(input: &mut &str) -> ModalResult<CharClass> {
    let negated = opt('^').parse_next(input)?.is_some();
    let items: Vec<ClassItem> = repeat(1.., class_item)
        .context(StrContext::Expected(StrContextValue::Description(
            "at least one member",
        )))
        .parse_next(input)?;
    ']'.context(StrContext::Expected(StrContextValue::CharLiteral(']')))
        .parse_next(input)?;
    Ok(CharClass { negated, items })
}

fn class_item(input: &mut &str) -> ModalResult<ClassItem> {
    alt((class_shorthand, class_range)).parse_next(input)
}

fn class_shorthand(input: &mut &str) -> ModalResult<ClassItem> {
    preceded('\\', any.verify_map(Shorthand::from_letter))
        .map(ClassItem::Shorthand)
        .parse_next(input)
}

/// Parse `c` or `a-z`. A `-` directly before `]` is a literal.
fn class_range(input: &mut &str) -> ModalResult<ClassItem> {
    let start = class_char(input)?;
    let end = opt(preceded(
        ('-', not(']')),
        cut_err(class_char.verify(move |end: &char| *end >= start))
            .context(StrContext::Label("character range")),
    ))
    .parse_next(input)?;
    Ok(ClassItem::Range(start, end.unwrap_or(start)))
}

fn class_char(input: &mut &str) -> ModalResult<char> {
    alt((preceded('\\', any).map(unescape), none_of([']', '\\']))).parse_next(input)
}

/// Parse a backslash escape outside a class.
fn escape(input: &mut &str) -> ModalResult<Atom> {
    '\\'.parse_next(input)?;
    cut_err(not(one_of(('1'..='9', 'k'))))
        .context(StrContext::Label("backreference"))
        .context(StrContext::Expected(StrContextValue::Description(
            "a literal or class escape (backreferences are not supported)",
        )))
        .parse_next(input)?;
    cut_err(any)
        .context(StrContext::Label("escape"))
        .map(|c| match Shorthand::from_letter(c) {
            Some(shorthand) => Atom::Class(CharClass::shorthand(shorthand)),
            None if matches!(c, 'b' | 'B') => Atom::Anchor,
            None => Atom::Literal(unescape(c)),
        })
        .parse_next(input)
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        other => other,
    }
}

/// Parse `?`, `*`, `+` or `{...}`, followed by an ignored lazy `?`.
fn quantifier(input: &mut &str) -> ModalResult<(u32, u32)> {
    let bounds = alt((
        '?'.value((0, 1)),
        '*'.value((0, UNBOUNDED_REPEAT_CAP)),
        '+'.value((1, 1 + UNBOUNDED_REPEAT_CAP)),
        repetition,
    ))
    .parse_next(input)?;
    let _ = opt('?').parse_next(input)?;
    Ok(bounds)
}

/// Parse `{m}`, `{m,n}` or `{m,}`.
fn repetition(input: &mut &str) -> ModalResult<(u32, u32)> {
    '{'.parse_next(input)?;
    cut_err(
        (number, opt(preceded(',', opt(number))), '}')
            .map(|(min, max, _)| match max {
                None => (min, min),
                Some(None) => (min, min.saturating_add(UNBOUNDED_REPEAT_CAP)),
                Some(Some(max)) => (min, max),
            })
            .verify(|(min, max): &(u32, u32)| min <= max && *max <= MAX_REPETITION),
    )
    .context(StrContext::Label("repetition"))
    .context(StrContext::Expected(StrContextValue::Description(
        "`{m}`, `{m,n}` or `{m,}` with m <= n <= 1000",
    )))
    .parse_next(input)
}

fn number(input: &mut &str) -> ModalResult<u32> {
    take_while(1.., |c: char| c.is_ascii_digit())
        .try_map(str::parse::<u32>)
        .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_piece(pattern: &str) -> Piece {
        let ast = parse_regex(pattern).unwrap();
        assert_eq!(ast.alternatives.len(), 1);
        assert_eq!(ast.alternatives[0].pieces.len(), 1);
        ast.alternatives[0].pieces[0].clone()
    }

    #[test]
    fn quantifier_bounds() {
        assert_eq!(single_piece("a?").max, 1);
        assert_eq!(single_piece("a*").max, UNBOUNDED_REPEAT_CAP);
        assert_eq!(single_piece("a+").min, 1);
        let bounded = single_piece("a{2,5}");
        assert_eq!((bounded.min, bounded.max), (2, 5));
        let open = single_piece("a{3,}");
        assert_eq!((open.min, open.max), (3, 3 + UNBOUNDED_REPEAT_CAP));
        let exact = single_piece("a{4}");
        assert_eq!((exact.min, exact.max), (4, 4));
    }

    #[test]
    fn lazy_marker_is_ignored() {
        let piece = single_piece("a+?");
        assert_eq!((piece.min, piece.max), (1, 1 + UNBOUNDED_REPEAT_CAP));
    }

    #[test]
    fn dash_before_bracket_is_literal() {
        let piece = single_piece("[a-]");
        let Atom::Class(class) = piece.atom else {
            panic!("expected class");
        };
        assert_eq!(class.candidates(), vec!['-', 'a']);
    }

    #[test]
    fn escapes_become_literals() {
        let ast = parse_regex(r"\.\*").unwrap();
        let atoms: Vec<Atom> = ast.alternatives[0]
            .pieces
            .iter()
            .map(|p| p.atom.clone())
            .collect();
        assert_eq!(atoms, vec![Atom::Literal('.'), Atom::Literal('*')]);
    }

    #[test]
    fn word_boundaries_are_anchors() {
        let ast = parse_regex(r"\bfoo\B").unwrap();
        let pieces = &ast.alternatives[0].pieces;
        assert_eq!(pieces.first().map(|p| &p.atom), Some(&Atom::Anchor));
        assert_eq!(pieces.last().map(|p| &p.atom), Some(&Atom::Anchor));
    }

    #[test]
    fn backreferences_are_rejected() {
        for pattern in [r"(a)\1", r"(?:x)\9", r"(a)\k"] {
            let err = parse_regex(pattern).unwrap_err();
            assert!(err.to_string().contains("backreference"), "{pattern}: {err}");
        }
    }

    #[test]
    fn expansion_limit_is_inclusive() {
        assert_eq!(parse_regex("(a{1000}){100}").unwrap().max_len(), MAX_EXPANSION);
        let err = parse_regex("(a{1000}){101}").unwrap_err();
        assert!(err.to_string().contains("repetition"), "{err}");
        assert!(parse_regex("((a{1000}){1000}){1000}").is_err());
    }

    #[test]
    fn empty_alternatives_are_allowed() {
        let ast = parse_regex("a|").unwrap();
        assert_eq!(ast.alternatives.len(), 2);
        assert!(ast.alternatives[1].pieces.is_empty());
    }
}
