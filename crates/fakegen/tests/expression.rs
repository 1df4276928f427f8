//! Integration tests for expression evaluation.

use fakegen::{EvalError, Faker, RandomService};
use insta::assert_snapshot;

fn faker() -> Faker {
    Faker::builder()
        .random(RandomService::seeded(11))
        .build()
        .unwrap()
}

fn faker_with_depth(max_depth: usize) -> Faker {
    Faker::builder()
        .random(RandomService::seeded(11))
        .max_depth(max_depth)
        .build()
        .unwrap()
}

// =========================================================================
// Literal Text
// =========================================================================

#[test]
fn text_without_directives_is_unchanged() {
    let faker = faker();
    assert_eq!(faker.expression("plain text").unwrap(), "plain text");
    assert_eq!(faker.expression("").unwrap(), "");
}

#[test]
fn lone_hash_and_brace_are_literal() {
    let faker = faker();
    assert_eq!(faker.expression("# not } a directive").unwrap(), "# not } a directive");
}

// =========================================================================
// Builtins
// =========================================================================

#[test]
fn numerify_directive() {
    let faker = faker();
    for _ in 0..50 {
        let out = faker.expression("ID-#{numerify '###'}").unwrap();
        assert!(out.starts_with("ID-"));
        assert_eq!(out.len(), 6);
        assert!(out[3..].chars().all(|c| c.is_ascii_digit()));
    }
}

#[test]
fn builtin_names_ignore_case() {
    let faker = faker();
    let out = faker.expression("#{NUMERIFY '##'}").unwrap();
    assert_eq!(out.len(), 2);
}

#[test]
fn letterify_with_case_flag() {
    let faker = faker();
    let out = faker.expression("#{letterify '????', 'true'}").unwrap();
    assert!(out.chars().all(|c| c.is_ascii_uppercase()));
    let out = faker.expression("#{letterify '????', 'false'}").unwrap();
    assert!(out.chars().all(|c| c.is_ascii_lowercase()));
}

#[test]
fn bothify_directive() {
    let faker = faker();
    let out = faker.expression("#{bothify '#?', 'true'}").unwrap();
    let chars: Vec<char> = out.chars().collect();
    assert!(chars[0].is_ascii_digit());
    assert!(chars[1].is_ascii_uppercase());
}

#[test]
fn regexify_keeps_backslash_escapes() {
    let faker = faker();
    for _ in 0..20 {
        let out = faker.expression(r"#{regexify '\d{3}\.[a-c]'}").unwrap();
        assert_eq!(out.len(), 5);
        assert!(out[..3].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(&out[3..4], ".");
    }
}

#[test]
fn regexify_directive_matches_direct_call() {
    let through_expression = faker();
    let direct = faker();
    for _ in 0..20 {
        assert_eq!(
            through_expression.expression("#{regexify '[a-c]{3}'}").unwrap(),
            direct.regexify("[a-c]{3}").unwrap()
        );
    }
}

#[test]
fn escaped_quote_in_argument() {
    let faker = faker();
    assert_eq!(
        faker.expression(r"#{templatify 'it\'s x', 'x', 'ok'}").unwrap(),
        "it's ok"
    );
}

#[test]
fn templatify_picks_from_options() {
    let faker = faker();
    for _ in 0..20 {
        let out = faker.expression("#{templatify 'a-a', 'a', 'x', 'y'}").unwrap();
        let parts: Vec<&str> = out.split('-').collect();
        assert!(parts.iter().all(|p| *p == "x" || *p == "y"), "{out}");
    }
}

#[test]
fn nested_directive_argument_is_evaluated_first() {
    let faker = faker();
    for _ in 0..20 {
        let out = faker.expression("#{examplify #{Name.last_name}}").unwrap();
        let mut chars = out.chars();
        assert!(chars.next().unwrap().is_ascii_uppercase());
        assert!(chars.all(|c| c.is_ascii_lowercase()), "{out}");
    }
}

// =========================================================================
// Providers and Re-evaluation
// =========================================================================

#[test]
fn provider_result_is_re_evaluated() {
    let faker = faker();
    let out = faker.expression("#{Name.name}").unwrap();
    assert!(!out.contains("#{"), "{out}");
    assert!(out.contains(' '));
}

#[test]
fn bare_names_resolve_within_the_current_category() {
    let mut faker = faker();
    faker
        .add_data_str(
            "en",
            "pet:\n  kind: [cat]\n  line: \"#{kind} and #{numerify '#'}\"\n",
        )
        .unwrap();
    faker.register_category("Pet");
    for _ in 0..10 {
        let out = faker.resolve("pet.line").unwrap();
        assert!(out.starts_with("cat and "), "{out}");
    }
    let out = faker.expression("#{Pet.line}").unwrap();
    assert!(out.starts_with("cat and "), "{out}");
}

#[test]
fn bare_names_outside_data_are_builtins() {
    let faker = faker();
    let err = faker.expression("#{first_name}").unwrap_err();
    assert!(matches!(err, EvalError::UnknownBuiltin { .. }), "{err}");
}

#[test]
fn camel_case_methods_are_accepted() {
    let faker = faker();
    let out = faker.expression("#{Name.firstName}").unwrap();
    assert!(!out.is_empty());
}

#[test]
fn number_provider_with_arguments() {
    let faker = faker();
    for _ in 0..50 {
        let n: i64 = faker
            .expression("#{Number.number_between '5','8'}")
            .unwrap()
            .parse()
            .unwrap();
        assert!((5..8).contains(&n));
    }
}

// =========================================================================
// Errors
// =========================================================================

#[test]
fn unclosed_directive_is_a_syntax_error() {
    let faker = faker();
    assert!(matches!(
        faker.expression("#{numerify '###'"),
        Err(EvalError::DirectiveSyntax { .. })
    ));
    assert!(matches!(
        faker.expression("#{"),
        Err(EvalError::DirectiveSyntax { .. })
    ));
}

#[test]
fn unknown_builtin_error() {
    let faker = faker();
    let err = faker.expression("#{numerfy '#'}").unwrap_err();
    assert_snapshot!(err.to_string(), @"unknown builtin 'numerfy', did you mean: numerify?");
}

#[test]
fn unknown_provider_error() {
    let faker = faker();
    let err = faker.expression("#{Nmae.first_name}").unwrap_err();
    assert_snapshot!(err.to_string(), @"unknown provider 'Nmae', did you mean: name?");
}

#[test]
fn unknown_method_error() {
    let faker = faker();
    let err = faker.expression("#{Name.shoe_size}").unwrap_err();
    assert_snapshot!(err.to_string(), @"provider 'name' has no method 'shoe_size'");
}

#[test]
fn wrong_arity_error() {
    let faker = faker();
    let err = faker.expression("#{numerify}").unwrap_err();
    assert_snapshot!(err.to_string(), @"'numerify' expects 1 arguments, got 0");
}

#[test]
fn bad_pattern_inside_expression() {
    let faker = faker();
    assert!(matches!(
        faker.expression("#{regexify '[a-'}"),
        Err(EvalError::PatternSyntax { .. })
    ));
}

#[test]
fn failure_produces_no_partial_output() {
    let faker = faker();
    assert!(faker.expression("ok #{numerify '#'} #{nope}").is_err());
}

// =========================================================================
// Depth Limit
// =========================================================================

#[test]
fn nesting_up_to_the_limit_succeeds() {
    let faker = faker_with_depth(3);
    let out = faker
        .expression("#{numerify #{numerify #{numerify '#'}}}")
        .unwrap();
    assert_eq!(out.len(), 1);
}

#[test]
fn nesting_past_the_limit_fails() {
    let faker = faker_with_depth(3);
    let err = faker
        .expression("#{numerify #{numerify #{numerify #{numerify '#'}}}}")
        .unwrap_err();
    assert_snapshot!(
        err.to_string(),
        @"maximum recursion depth 3 exceeded: numerify -> numerify -> numerify -> numerify"
    );
}

#[test]
fn self_referencing_data_hits_the_limit() {
    let mut faker = faker_with_depth(10);
    faker
        .add_data_str("en", "loop:\n  again: \"#{Loop.again}\"\n")
        .unwrap();
    faker.register_category("Loop");
    let err = faker.resolve("loop.again").unwrap_err();
    let EvalError::MaxDepthExceeded { limit, chain } = err else {
        panic!("expected MaxDepthExceeded, got {err}");
    };
    assert_eq!(limit, 10);
    assert_eq!(chain.len(), 11);
    assert!(chain.iter().all(|label| label == "Loop.again"));
}
