//! Integration tests for the generator entry points on `Faker`.

use std::collections::HashMap;

use fakegen::{EvalError, Faker, RandomService};

fn seeded(seed: u64) -> Faker {
    Faker::builder()
        .random(RandomService::seeded(seed))
        .build()
        .unwrap()
}

// =========================================================================
// Pattern Generators
// =========================================================================

#[test]
fn placeholders_preserve_length_in_chars() {
    let faker = seeded(1);
    let template = "Ä#?-ö#?";
    assert_eq!(faker.numerify(template).chars().count(), 7);
    assert_eq!(faker.letterify(template, None).chars().count(), 7);
    assert_eq!(faker.bothify(template, Some(false)).chars().count(), 7);
    assert_eq!(faker.examplify(template).chars().count(), 7);
}

#[test]
fn bothify_replaces_both_placeholders() {
    let faker = seeded(2);
    let out = faker.bothify("??##", Some(true));
    assert!(out[..2].chars().all(|c| c.is_ascii_uppercase()));
    assert!(out[2..].chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn templatify_map_uses_each_placeholder_list() {
    let faker = seeded(3);
    let options = HashMap::from([('A', vec!["x"]), ('B', vec!["y", "z"])]);
    for _ in 0..20 {
        let out = faker.templatify_map("A+B", &options).unwrap();
        assert!(out == "x+y" || out == "x+z", "{out}");
    }
}

#[test]
fn templatify_rejects_empty_options() {
    let faker = seeded(3);
    let none: [&str; 0] = [];
    assert!(matches!(
        faker.templatify("a", 'a', &none),
        Err(EvalError::InvalidArgument { .. })
    ));
}

// =========================================================================
// Regexify
// =========================================================================

#[test]
fn regexify_matches_shape() {
    let faker = seeded(4);
    for _ in 0..100 {
        let out = faker.regexify(r"[A-Z]{3}-\d{2,4}(x|yz)?").unwrap();
        let (letters, rest) = out.split_at(3);
        assert!(letters.chars().all(|c| c.is_ascii_uppercase()));
        let rest = rest.strip_prefix('-').unwrap();
        let digits = rest.chars().take_while(char::is_ascii_digit).count();
        assert!((2..=4).contains(&digits), "{out}");
        assert!(["", "x", "yz"].contains(&&rest[digits..]), "{out}");
    }
}

#[test]
fn regexify_star_cap() {
    let faker = seeded(5);
    for _ in 0..200 {
        let out = faker.regexify("a*").unwrap();
        assert!(out.len() <= 8);
    }
}

#[test]
fn regexify_open_repetition_cap() {
    let faker = seeded(6);
    for _ in 0..200 {
        let len = faker.regexify("b{2,}").unwrap().len();
        assert!((2..=10).contains(&len));
    }
}

#[test]
fn non_capturing_group() {
    let faker = seeded(7);
    let out = faker.regexify("(?:ab){2}").unwrap();
    assert_eq!(out, "abab");
}

#[test]
fn unsupported_syntax_is_rejected() {
    let faker = seeded(8);
    for pattern in [
        "(?=a)", "[z-a]", "a{3,1}", "(ab", "ab)", "*a", "[]", r"(a)\1", r"a\k<x>",
    ] {
        assert!(
            matches!(faker.regexify(pattern), Err(EvalError::PatternSyntax { .. })),
            "{pattern} should be rejected"
        );
    }
}

#[test]
fn word_boundaries_generate_nothing() {
    let faker = seeded(8);
    assert_eq!(faker.regexify(r"\bfoo\b").unwrap(), "foo");
}

#[test]
fn nested_repetition_is_bounded_overall() {
    let faker = seeded(8);
    let out = faker.regexify("(a{1000}){100}").unwrap();
    assert_eq!(out.len(), 100_000);
    for pattern in ["(a{1000}){101}", "((a{1000}){1000}){20}", "(.{1000}){1000}"] {
        let err = faker.regexify(pattern).unwrap_err();
        assert!(err.to_string().contains("repetition"), "{pattern}: {err}");
    }
}

// =========================================================================
// Determinism
// =========================================================================

#[test]
fn same_seed_same_output() {
    let a = seeded(99);
    let b = seeded(99);
    for _ in 0..20 {
        assert_eq!(a.resolve("name.name").unwrap(), b.resolve("name.name").unwrap());
        assert_eq!(a.regexify("[a-z]{5,9}").unwrap(), b.regexify("[a-z]{5,9}").unwrap());
        assert_eq!(
            a.expression("#{bothify '??-##'} #{EnglandFootball.team}").unwrap(),
            b.expression("#{bothify '??-##'} #{EnglandFootball.team}").unwrap()
        );
    }
}

#[test]
fn injected_rng_is_used() {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    let a = Faker::builder()
        .random(RandomService::from_rng(ChaCha8Rng::seed_from_u64(12)))
        .build()
        .unwrap();
    let b = seeded(12);
    assert_eq!(a.numerify("#########"), b.numerify("#########"));
}
