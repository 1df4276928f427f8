//! Providers: named groups of generator methods reachable from directives.
//!
//! A directive such as `#{EnglandFootball.team}` looks up the provider
//! registered as `EnglandFootball` and calls its `team` method. Most providers
//! only forward to a data category; [`CategoryProvider`] covers that case.

use std::str::FromStr;
use std::sync::Arc;

use crate::interpreter::{EvalContext, EvalError, Faker};

/// A named source of generated values.
pub trait Provider: Send + Sync {
    /// Produce a value for `method` (already in snake_case) with evaluated
    /// `args`, resolving any data keys through `faker` within `ctx`.
    fn call(
        &self,
        method: &str,
        args: &[String],
        faker: &Faker,
        ctx: &mut EvalContext,
    ) -> Result<String, EvalError>;
}

/// Convert a directive method name to its data key form: `firstName` becomes
/// `first_name`, `first_name` is unchanged.
pub fn method_key(method: &str) -> String {
    let mut key = String::with_capacity(method.len() + 4);
    let mut previous: Option<char> = None;
    for c in method.chars() {
        if c.is_uppercase() {
            if previous.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
                key.push('_');
            }
            key.extend(c.to_lowercase());
        } else {
            key.push(c);
        }
        previous = Some(c);
    }
    key
}

/// Resolves `<category>.<method>` for every method.
///
/// A method with no matching key is reported as
/// [`EvalError::UnknownMethod`]; keys missing further down a recursive
/// resolution are still reported as [`EvalError::KeyNotFound`].
#[derive(Debug, Clone)]
pub struct CategoryProvider {
    category: String,
}

impl CategoryProvider {
    /// Create a provider for the data category `category`.
    pub fn new(category: &str) -> Self {
        Self {
            category: method_key(category).replace('_', ""),
        }
    }

    /// The lowercase category this provider reads from.
    pub fn category(&self) -> &str {
        &self.category
    }
}

impl Provider for CategoryProvider {
    fn call(
        &self,
        method: &str,
        args: &[String],
        faker: &Faker,
        ctx: &mut EvalContext,
    ) -> Result<String, EvalError> {
        resolve_category(&self.category, method, args, faker, ctx)
    }
}

fn resolve_category(
    category: &str,
    method: &str,
    args: &[String],
    faker: &Faker,
    ctx: &mut EvalContext,
) -> Result<String, EvalError> {
    let key = format!("{category}.{method}");
    if !faker.has_key(&key) {
        return Err(EvalError::UnknownMethod {
            provider: category.to_string(),
            method: method.to_string(),
        });
    }
    no_args(&key, args)?;
    faker.resolve_in(&key, ctx)
}

fn no_args(directive: &str, args: &[String]) -> Result<(), EvalError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(EvalError::ArgumentCount {
            directive: directive.to_string(),
            expected: "0".to_string(),
            got: args.len(),
        })
    }
}

/// English football leagues and teams.
#[derive(Debug, Default)]
pub struct EnglandFootball;

impl EnglandFootball {
    const CATEGORY: &'static str = "englandfootball";

    /// A random team name.
    pub fn team(&self, faker: &Faker, ctx: &mut EvalContext) -> Result<String, EvalError> {
        faker.resolve_in("englandfootball.teams", ctx)
    }

    /// A random league name.
    pub fn league(&self, faker: &Faker, ctx: &mut EvalContext) -> Result<String, EvalError> {
        faker.resolve_in("englandfootball.leagues", ctx)
    }
}

impl Provider for EnglandFootball {
    fn call(
        &self,
        method: &str,
        args: &[String],
        faker: &Faker,
        ctx: &mut EvalContext,
    ) -> Result<String, EvalError> {
        match method {
            "team" | "teams" => {
                no_args(method, args)?;
                self.team(faker, ctx)
            }
            "league" | "leagues" => {
                no_args(method, args)?;
                self.league(faker, ctx)
            }
            other => resolve_category(Self::CATEGORY, other, args, faker, ctx),
        }
    }
}

/// Random numbers and digit strings.
#[derive(Debug, Default)]
pub struct Number;

impl Number {
    /// Uniform integer in `[min, max)`.
    pub fn number_between(&self, faker: &Faker, min: i64, max: i64) -> Result<i64, EvalError> {
        faker.random().between(min, max)
    }

    /// A single digit, `0` through `9`.
    pub fn random_digit(&self, faker: &Faker) -> Result<usize, EvalError> {
        faker.random().draw(10)
    }

    /// A single digit, `1` through `9`.
    pub fn random_digit_not_zero(&self, faker: &Faker) -> Result<usize, EvalError> {
        Ok(faker.random().draw(9)? + 1)
    }

    /// Longest digit string [`Number::digits`] produces.
    pub const MAX_DIGITS: usize = 1000;

    /// A string of `count` random digits.
    ///
    /// Counts above [`Number::MAX_DIGITS`] are rejected with
    /// [`EvalError::InvalidArgument`].
    pub fn digits(&self, faker: &Faker, count: usize) -> Result<String, EvalError> {
        if count > Self::MAX_DIGITS {
            return Err(EvalError::invalid_argument(format!(
                "digits: count {count} exceeds the maximum of {}",
                Self::MAX_DIGITS
            )));
        }
        Ok(faker.numerify(&"#".repeat(count)))
    }
}

fn parse_number<T: FromStr>(directive: &str, value: &str) -> Result<T, EvalError> {
    value.trim().parse().map_err(|_| {
        EvalError::invalid_argument(format!("{directive}: '{value}' is not a valid integer"))
    })
}

fn expect_count(directive: &str, args: &[String], count: usize) -> Result<(), EvalError> {
    if args.len() == count {
        Ok(())
    } else {
        Err(EvalError::ArgumentCount {
            directive: directive.to_string(),
            expected: count.to_string(),
            got: args.len(),
        })
    }
}

impl Provider for Number {
    fn call(
        &self,
        method: &str,
        args: &[String],
        faker: &Faker,
        _ctx: &mut EvalContext,
    ) -> Result<String, EvalError> {
        match method {
            "number_between" => {
                expect_count(method, args, 2)?;
                let min = parse_number(method, &args[0])?;
                let max = parse_number(method, &args[1])?;
                Ok(self.number_between(faker, min, max)?.to_string())
            }
            "random_digit" => {
                expect_count(method, args, 0)?;
                Ok(self.random_digit(faker)?.to_string())
            }
            "random_digit_not_zero" => {
                expect_count(method, args, 0)?;
                Ok(self.random_digit_not_zero(faker)?.to_string())
            }
            "digits" => {
                expect_count(method, args, 1)?;
                let count = parse_number(method, &args[0])?;
                self.digits(faker, count)
            }
            other => Err(EvalError::UnknownMethod {
                provider: "number".to_string(),
                method: other.to_string(),
            }),
        }
    }
}

/// A provider instance bound to the [`Faker`] that owns it.
///
/// Returned by [`Faker::provider`]; each call starts a fresh evaluation
/// context.
pub struct ProviderRef<'a, P> {
    faker: &'a Faker,
    instance: Arc<P>,
}

impl<'a, P: Provider> ProviderRef<'a, P> {
    pub(crate) fn new(faker: &'a Faker, instance: Arc<P>) -> Self {
        Self { faker, instance }
    }

    /// The shared provider instance.
    pub fn instance(&self) -> &Arc<P> {
        &self.instance
    }

    /// Call `method` by name, as a directive would.
    pub fn invoke(&self, method: &str, args: &[String]) -> Result<String, EvalError> {
        let mut ctx = self.faker.new_context();
        self.instance
            .call(&method_key(method), args, self.faker, &mut ctx)
    }
}

impl ProviderRef<'_, EnglandFootball> {
    /// A random English football team.
    pub fn team(&self) -> Result<String, EvalError> {
        self.instance.team(self.faker, &mut self.faker.new_context())
    }

    /// A random English football league.
    pub fn league(&self) -> Result<String, EvalError> {
        self.instance
            .league(self.faker, &mut self.faker.new_context())
    }
}

impl ProviderRef<'_, Number> {
    /// Uniform integer in `[min, max)`.
    pub fn number_between(&self, min: i64, max: i64) -> Result<i64, EvalError> {
        self.instance.number_between(self.faker, min, max)
    }

    /// A string of `count` random digits, at most [`Number::MAX_DIGITS`].
    pub fn digits(&self, count: usize) -> Result<String, EvalError> {
        self.instance.digits(self.faker, count)
    }
}
