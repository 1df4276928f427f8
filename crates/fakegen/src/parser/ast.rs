//! Public AST types for directive expressions and regex-subset patterns.
//!
//! These types are public to enable external tooling (linters, data checkers).

use std::ops::RangeInclusive;

/// A parsed expression: literal text interleaved with `#{...}` directives.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    /// True if the template contains no directives.
    pub fn is_literal(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| matches!(segment, Segment::Literal(_)))
    }
}

/// A segment within a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text.
    Literal(String),
    /// A `#{...}` directive.
    Directive(Directive),
}

/// The body of a `#{...}` directive.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// A generator call: `#{regexify '[a-z]{3}'}`
    Builtin { name: String, args: Vec<Argument> },
    /// A provider reference: `#{Name.first_name}` or
    /// `#{Number.number_between '1','10'}`
    Provider {
        provider: String,
        method: String,
        args: Vec<Argument>,
    },
}

impl Directive {
    /// Human-readable name used in error messages and call stacks.
    pub fn label(&self) -> String {
        match self {
            Directive::Builtin { name, .. } => name.clone(),
            Directive::Provider {
                provider, method, ..
            } => format!("{provider}.{method}"),
        }
    }

    /// Arguments passed to the directive.
    pub fn args(&self) -> &[Argument] {
        match self {
            Directive::Builtin { args, .. } | Directive::Provider { args, .. } => args,
        }
    }
}

/// A directive argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// A single-quoted literal, passed through unevaluated.
    Literal(String),
    /// An unquoted nested directive, evaluated before the call.
    Nested(Box<Directive>),
}

/// A parsed regex-subset pattern: one or more alternatives.
#[derive(Debug, Clone, PartialEq)]
pub struct RegexAst {
    pub alternatives: Vec<Sequence>,
}

impl RegexAst {
    /// Length in characters of the longest string this pattern can generate,
    /// saturating at `u64::MAX`.
    pub fn max_len(&self) -> u64 {
        self.alternatives
            .iter()
            .map(Sequence::max_len)
            .max()
            .unwrap_or(0)
    }
}

/// A run of pieces matched one after another.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub pieces: Vec<Piece>,
}

impl Sequence {
    fn max_len(&self) -> u64 {
        self.pieces
            .iter()
            .fold(0, |total, piece| total.saturating_add(piece.max_len()))
    }
}

/// An atom repeated between `min` and `max` times (inclusive).
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub atom: Atom,
    pub min: u32,
    pub max: u32,
}

impl Piece {
    fn max_len(&self) -> u64 {
        let atom_len = match &self.atom {
            Atom::Literal(_) | Atom::Class(_) | Atom::Any => 1,
            Atom::Group(inner) => inner.max_len(),
            Atom::Anchor => 0,
        };
        atom_len.saturating_mul(u64::from(self.max))
    }
}

/// The smallest generative unit of a pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    /// A literal character.
    Literal(char),
    /// A bracketed or shorthand character class.
    Class(CharClass),
    /// `.`: any character of the generation alphabet.
    Any,
    /// A parenthesized sub-pattern.
    Group(RegexAst),
    /// `^`, `$`, `\b` or `\B`: accepted, generates nothing.
    Anchor,
}

/// A set of characters, possibly negated against the generation alphabet.
#[derive(Debug, Clone, PartialEq)]
pub struct CharClass {
    pub negated: bool,
    pub items: Vec<ClassItem>,
}

/// One member of a character class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClassItem {
    /// An inclusive range; a single character is `Range(c, c)`.
    Range(char, char),
    /// `\d`, `\w`, `\s` and their negations.
    Shorthand(Shorthand),
}

/// Backslash shorthand classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shorthand {
    Digit,
    NotDigit,
    Word,
    NotWord,
    Space,
    NotSpace,
}

impl Shorthand {
    /// Parse the letter following a backslash.
    pub fn from_letter(letter: char) -> Option<Shorthand> {
        match letter {
            'd' => Some(Shorthand::Digit),
            'D' => Some(Shorthand::NotDigit),
            'w' => Some(Shorthand::Word),
            'W' => Some(Shorthand::NotWord),
            's' => Some(Shorthand::Space),
            'S' => Some(Shorthand::NotSpace),
            _ => None,
        }
    }

    /// True if `c` belongs to this shorthand class.
    pub fn contains(self, c: char) -> bool {
        match self {
            Shorthand::Digit => c.is_ascii_digit(),
            Shorthand::NotDigit => !c.is_ascii_digit(),
            Shorthand::Word => c.is_ascii_alphanumeric() || c == '_',
            Shorthand::NotWord => !(c.is_ascii_alphanumeric() || c == '_'),
            Shorthand::Space => c.is_whitespace(),
            Shorthand::NotSpace => !c.is_whitespace(),
        }
    }
}

/// Characters `.` and negated classes draw from: printable ASCII.
pub const ALPHABET: RangeInclusive<char> = ' '..='~';

impl CharClass {
    /// A single-shorthand class such as `\d`.
    pub fn shorthand(shorthand: Shorthand) -> Self {
        CharClass {
            negated: false,
            items: vec![ClassItem::Shorthand(shorthand)],
        }
    }

    fn matches(&self, c: char) -> bool {
        self.items.iter().any(|item| match *item {
            ClassItem::Range(lo, hi) => (lo..=hi).contains(&c),
            ClassItem::Shorthand(shorthand) => shorthand.contains(c),
        })
    }

    /// The distinct characters this class can generate, in code point order.
    ///
    /// Explicit ranges contribute every character they span. Shorthands and
    /// negation are evaluated against [`ALPHABET`], plus `\t` and `\n` for
    /// whitespace.
    pub fn candidates(&self) -> Vec<char> {
        if self.negated {
            return ALPHABET.filter(|c| !self.matches(*c)).collect();
        }
        let mut chars: Vec<char> = Vec::new();
        for item in &self.items {
            match *item {
                ClassItem::Range(lo, hi) => chars.extend(lo..=hi),
                ClassItem::Shorthand(shorthand) => chars.extend(
                    ALPHABET
                        .chain(['\t', '\n'])
                        .filter(|c| shorthand.contains(*c)),
                ),
            }
        }
        chars.sort_unstable();
        chars.dedup();
        chars
    }
}
