//! Placeholder substitution generators.
//!
//! Every function here is pure given the draws it takes from `rng`: the same
//! template and the same random stream always give the same output. Lengths
//! are measured in characters.

use std::collections::HashMap;

use rand::Rng;

use crate::interpreter::EvalError;

/// Placeholder replaced by a digit in [`numerify`].
pub const DIGIT_PLACEHOLDER: char = '#';

/// Placeholder replaced by a letter in [`letterify`].
pub const LETTER_PLACEHOLDER: char = '?';

fn random_digit<R: Rng + ?Sized>(rng: &mut R) -> char {
    char::from(b'0' + rng.random_range(0..10u8))
}

fn random_lowercase<R: Rng + ?Sized>(rng: &mut R) -> char {
    char::from(b'a' + rng.random_range(0..26u8))
}

fn random_uppercase<R: Rng + ?Sized>(rng: &mut R) -> char {
    char::from(b'A' + rng.random_range(0..26u8))
}

fn random_letter<R: Rng + ?Sized>(rng: &mut R, upper: Option<bool>) -> char {
    let upper = upper.unwrap_or_else(|| rng.random_bool(0.5));
    if upper {
        random_uppercase(rng)
    } else {
        random_lowercase(rng)
    }
}

/// Replace every `#` with a random digit.
///
/// ```
/// use fakegen::generators::numerify;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(3);
/// let code = numerify("AB-###", &mut rng);
/// assert!(code.starts_with("AB-"));
/// assert!(code[3..].chars().all(|c| c.is_ascii_digit()));
/// ```
pub fn numerify<R: Rng + ?Sized>(template: &str, rng: &mut R) -> String {
    template
        .chars()
        .map(|c| {
            if c == DIGIT_PLACEHOLDER {
                random_digit(rng)
            } else {
                c
            }
        })
        .collect()
}

/// Replace every `?` with a random ASCII letter.
///
/// `upper` fixes the case of every substituted letter; `None` picks the case
/// independently for each one.
pub fn letterify<R: Rng + ?Sized>(template: &str, upper: Option<bool>, rng: &mut R) -> String {
    template
        .chars()
        .map(|c| {
            if c == LETTER_PLACEHOLDER {
                random_letter(rng, upper)
            } else {
                c
            }
        })
        .collect()
}

/// Apply [`numerify`] and [`letterify`] in a single pass.
pub fn bothify<R: Rng + ?Sized>(template: &str, upper: Option<bool>, rng: &mut R) -> String {
    template
        .chars()
        .map(|c| match c {
            DIGIT_PLACEHOLDER => random_digit(rng),
            LETTER_PLACEHOLDER => random_letter(rng, upper),
            other => other,
        })
        .collect()
}

/// Produce a string shaped like `example`.
///
/// Uppercase letters become random uppercase letters, lowercase letters random
/// lowercase letters, digits random digits. Everything else is copied.
pub fn examplify<R: Rng + ?Sized>(example: &str, rng: &mut R) -> String {
    example
        .chars()
        .map(|c| {
            if c.is_uppercase() {
                random_uppercase(rng)
            } else if c.is_lowercase() {
                random_lowercase(rng)
            } else if c.is_ascii_digit() {
                random_digit(rng)
            } else {
                c
            }
        })
        .collect()
}

/// Replace every `placeholder` with an independently chosen option.
///
/// # Errors
///
/// Returns [`EvalError::InvalidArgument`] if `options` is empty.
pub fn templatify<R, S>(
    template: &str,
    placeholder: char,
    options: &[S],
    rng: &mut R,
) -> Result<String, EvalError>
where
    R: Rng + ?Sized,
    S: AsRef<str>,
{
    if options.is_empty() {
        return Err(EvalError::invalid_argument(format!(
            "no options given for placeholder '{placeholder}'"
        )));
    }
    let mut output = String::with_capacity(template.len());
    for c in template.chars() {
        if c == placeholder {
            output.push_str(choose(options, rng));
        } else {
            output.push(c);
        }
    }
    Ok(output)
}

/// Replace each placeholder character that is a key of `options_by_char` with
/// an independently chosen option from its list.
///
/// Characters that are not keys pass through unchanged.
///
/// # Errors
///
/// Returns [`EvalError::InvalidArgument`] if a placeholder that occurs in
/// `template` maps to an empty option list.
pub fn templatify_map<R, S>(
    template: &str,
    options_by_char: &HashMap<char, Vec<S>>,
    rng: &mut R,
) -> Result<String, EvalError>
where
    R: Rng + ?Sized,
    S: AsRef<str>,
{
    let mut output = String::with_capacity(template.len());
    for c in template.chars() {
        match options_by_char.get(&c) {
            Some(options) if options.is_empty() => {
                return Err(EvalError::invalid_argument(format!(
                    "no options given for placeholder '{c}'"
                )));
            }
            Some(options) => output.push_str(choose(options, rng)),
            None => output.push(c),
        }
    }
    Ok(output)
}

fn choose<'a, R, S>(options: &'a [S], rng: &mut R) -> &'a str
where
    R: Rng + ?Sized,
    S: AsRef<str>,
{
    let index = rng.random_range(0..options.len());
    options.get(index).map_or("", AsRef::as_ref)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(17)
    }

    #[test]
    fn numerify_only_touches_hashes() {
        let mut rng = rng();
        for _ in 0..100 {
            let out = numerify("a#b##?", &mut rng);
            let chars: Vec<char> = out.chars().collect();
            assert_eq!(chars.len(), 6);
            assert_eq!(chars[0], 'a');
            assert!(chars[1].is_ascii_digit());
            assert_eq!(chars[2], 'b');
            assert!(chars[3].is_ascii_digit() && chars[4].is_ascii_digit());
            assert_eq!(chars[5], '?');
        }
    }

    #[test]
    fn letterify_respects_case() {
        let mut rng = rng();
        for _ in 0..100 {
            let upper = letterify("??-??", Some(true), &mut rng);
            assert!(upper.chars().filter(|c| *c != '-').all(|c| c.is_ascii_uppercase()));
            let lower = letterify("??-??", Some(false), &mut rng);
            assert!(lower.chars().filter(|c| *c != '-').all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn letterify_without_case_mixes_cases() {
        let mut rng = rng();
        let out = letterify(&"?".repeat(200), None, &mut rng);
        assert!(out.chars().any(|c| c.is_ascii_uppercase()));
        assert!(out.chars().any(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn bothify_fills_both_placeholders() {
        let mut rng = rng();
        let out = bothify("#?#?", Some(true), &mut rng);
        let chars: Vec<char> = out.chars().collect();
        assert!(chars[0].is_ascii_digit() && chars[2].is_ascii_digit());
        assert!(chars[1].is_ascii_uppercase() && chars[3].is_ascii_uppercase());
    }

    #[test]
    fn examplify_preserves_character_classes() {
        let mut rng = rng();
        for _ in 0..100 {
            let out: Vec<char> = examplify("A1b-Z 9", &mut rng).chars().collect();
            assert_eq!(out.len(), 7);
            assert!(out[0].is_ascii_uppercase());
            assert!(out[1].is_ascii_digit());
            assert!(out[2].is_ascii_lowercase());
            assert_eq!(out[3], '-');
            assert!(out[4].is_ascii_uppercase());
            assert_eq!(out[5], ' ');
            assert!(out[6].is_ascii_digit());
        }
    }

    #[test]
    fn templatify_requires_options() {
        let mut rng = rng();
        let none: [&str; 0] = [];
        assert!(matches!(
            templatify("X", 'X', &none, &mut rng),
            Err(EvalError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn templatify_map_replaces_known_placeholders() {
        let mut rng = rng();
        let options = HashMap::from([('$', vec!["one", "two"]), ('%', vec!["z"])]);
        for _ in 0..50 {
            let out = templatify_map("$|%|&", &options, &mut rng).unwrap();
            let parts: Vec<&str> = out.split('|').collect();
            assert!(parts[0] == "one" || parts[0] == "two");
            assert_eq!(parts[1], "z");
            assert_eq!(parts[2], "&");
        }
    }
}
