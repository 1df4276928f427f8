//! Integration tests for provider dispatch and memoization.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use fakegen::{EnglandFootball, EvalContext, EvalError, Faker, Number, Provider, RandomService};

fn faker() -> Faker {
    Faker::builder()
        .random(RandomService::seeded(21))
        .build()
        .unwrap()
}

static SHOUT_INSTANCES: AtomicUsize = AtomicUsize::new(0);

/// Upper-cases its arguments.
struct Shout;

impl Shout {
    fn create() -> Self {
        SHOUT_INSTANCES.fetch_add(1, Ordering::SeqCst);
        Shout
    }
}

impl Provider for Shout {
    fn call(
        &self,
        method: &str,
        args: &[String],
        _faker: &Faker,
        _ctx: &mut EvalContext,
    ) -> Result<String, EvalError> {
        match method {
            "say" => Ok(args.join(" ").to_uppercase()),
            other => Err(EvalError::UnknownMethod {
                provider: "shout".to_string(),
                method: other.to_string(),
            }),
        }
    }
}

// =========================================================================
// Built-in Providers
// =========================================================================

#[test]
fn england_football_typed_api() {
    let faker = faker();
    let football = faker.england_football();
    let team = football.team().unwrap();
    let league = football.league().unwrap();
    assert!(faker.data().keys("en").contains(&"englandfootball.teams".to_string()));
    assert!(!team.is_empty());
    assert!(
        ["Premier League", "Championship", "League One", "League Two", "National League"]
            .contains(&league.as_str())
    );
}

#[test]
fn provider_names_ignore_case_and_underscores() {
    let faker = faker();
    for expression in [
        "#{EnglandFootball.team}",
        "#{englandfootball.teams}",
        "#{England_Football.team}",
    ] {
        assert!(!faker.expression(expression).unwrap().is_empty());
    }
}

#[test]
fn number_typed_api() {
    let faker = faker();
    let number = faker.provider::<Number>();
    for _ in 0..50 {
        assert!((-3..3).contains(&number.number_between(-3, 3).unwrap()));
    }
    let digits = number.digits(12).unwrap();
    assert_eq!(digits.len(), 12);
    assert!(digits.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn number_rejects_bad_arguments() {
    let faker = faker();
    assert!(matches!(
        faker.expression("#{Number.number_between 'a','3'}"),
        Err(EvalError::InvalidArgument { .. })
    ));
    assert!(matches!(
        faker.expression("#{Number.number_between '3','3'}"),
        Err(EvalError::InvalidArgument { .. })
    ));
    assert!(matches!(
        faker.expression("#{Number.number_between '3'}"),
        Err(EvalError::ArgumentCount { got: 1, .. })
    ));
}

#[test]
fn digit_counts_are_bounded() {
    let faker = faker();
    let out = faker.expression("#{Number.digits '1000'}").unwrap();
    assert_eq!(out.len(), Number::MAX_DIGITS);
    for count in ["1001", "18446744073709551615"] {
        let expression = format!("#{{Number.digits '{count}'}}");
        assert!(
            matches!(faker.expression(&expression), Err(EvalError::InvalidArgument { .. })),
            "{count}"
        );
    }
    assert!(faker.provider::<Number>().digits(Number::MAX_DIGITS + 1).is_err());
}

#[test]
fn random_digit_not_zero_never_yields_zero() {
    let faker = faker();
    for _ in 0..100 {
        let digit = faker.expression("#{Number.randomDigitNotZero}").unwrap();
        assert_ne!(digit, "0");
    }
}

// =========================================================================
// Memoization
// =========================================================================

#[test]
fn typed_access_and_directives_share_one_instance() {
    let faker = faker();
    let before = faker.england_football();
    faker.expression("#{EnglandFootball.team}").unwrap();
    let after = faker.provider::<EnglandFootball>();
    assert!(Arc::ptr_eq(before.instance(), after.instance()));
}

#[test]
fn concurrent_first_access_yields_one_instance() {
    let faker = faker();
    let instances: Vec<Arc<EnglandFootball>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| Arc::clone(faker.england_football().instance())))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(instances.iter().all(|i| Arc::ptr_eq(i, &instances[0])));
}

#[test]
fn registered_factory_runs_once() {
    let mut faker = faker();
    faker.register_provider("Shout", Shout::create);
    let before = SHOUT_INSTANCES.load(Ordering::SeqCst);
    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let out = faker.expression("#{Shout.say 'hi', 'there'}").unwrap();
                assert_eq!(out, "HI THERE");
            });
        }
    });
    assert_eq!(SHOUT_INSTANCES.load(Ordering::SeqCst) - before, 1);
}

#[test]
fn faker_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Faker>();
}

// =========================================================================
// Category Providers
// =========================================================================

#[test]
fn registered_category_resolves_keys() {
    let mut faker = faker();
    faker
        .add_data_str("en", "weather:\n  sky: [cloudy]\n")
        .unwrap();
    faker.register_category("Weather");
    assert_eq!(faker.expression("#{Weather.sky}").unwrap(), "cloudy");
    assert!(matches!(
        faker.expression("#{Weather.rain}"),
        Err(EvalError::UnknownMethod { .. })
    ));
}

#[test]
fn england_football_falls_back_to_its_category() {
    let mut faker = faker();
    faker
        .add_data_str("en", "englandfootball:\n  stadiums: [Anfield]\n")
        .unwrap();
    assert_eq!(faker.expression("#{EnglandFootball.stadiums}").unwrap(), "Anfield");
}

#[test]
fn invoke_calls_by_method_name() {
    let faker = faker();
    let out = faker.provider::<Number>().invoke("randomDigit", &[]).unwrap();
    assert_eq!(out.len(), 1);
}
