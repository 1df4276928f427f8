//! String generation from regex-subset patterns.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::interpreter::EvalError;
use crate::parser::{ALPHABET, Atom, Piece, RegexAst, parse_regex};

/// Generate a string matched by `pattern`.
///
/// Repetition counts, alternatives and class members are drawn uniformly.
/// Unbounded quantifiers are capped as described in
/// [`UNBOUNDED_REPEAT_CAP`](crate::parser::UNBOUNDED_REPEAT_CAP).
///
/// # Errors
///
/// Returns [`EvalError::PatternSyntax`] if the pattern uses syntax outside
/// the supported subset, or could generate more than
/// [`MAX_EXPANSION`](crate::parser::MAX_EXPANSION) characters. Nothing is
/// generated in that case.
///
/// ```
/// use fakegen::generators::regexify;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(5);
/// let plate = regexify("[A-Z]{2}-\\d{3}", &mut rng).unwrap();
/// assert_eq!(plate.len(), 6);
/// ```
pub fn regexify<R: Rng + ?Sized>(pattern: &str, rng: &mut R) -> Result<String, EvalError> {
    let ast = parse_regex(pattern).map_err(|source| EvalError::PatternSyntax {
        pattern: pattern.to_string(),
        source,
    })?;
    let mut output = String::new();
    generate(&ast, rng, &mut output);
    Ok(output)
}

/// Append one string matched by `ast` to `output`.
pub fn generate<R: Rng + ?Sized>(ast: &RegexAst, rng: &mut R, output: &mut String) {
    let Some(sequence) = ast.alternatives.choose(rng) else {
        return;
    };
    for piece in &sequence.pieces {
        generate_piece(piece, rng, output);
    }
}

fn generate_piece<R: Rng + ?Sized>(piece: &Piece, rng: &mut R, output: &mut String) {
    let count = rng.random_range(piece.min..=piece.max);
    match &piece.atom {
        Atom::Literal(c) => output.extend((0..count).map(|_| *c)),
        Atom::Class(class) => {
            let candidates = class.candidates();
            for _ in 0..count {
                if let Some(c) = candidates.choose(rng) {
                    output.push(*c);
                }
            }
        }
        Atom::Any => {
            for _ in 0..count {
                output.push(rng.random_range(ALPHABET));
            }
        }
        Atom::Group(inner) => {
            for _ in 0..count {
                generate(inner, rng, output);
            }
        }
        Atom::Anchor => {}
    }
}
