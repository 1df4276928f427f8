//! Builtin generator directives: `#{numerify '...'}`, `#{regexify '...'}`, etc.
//!
//! Builtins receive their arguments already evaluated and draw all of their
//! randomness from the [`RandomService`] they are given.

use std::collections::HashMap;

use crate::generators;
use crate::interpreter::{EvalError, compute_suggestions};
use crate::random::RandomService;

/// Builtin function signature.
///
/// Takes the evaluated arguments and the random service to draw from.
pub type BuiltinFn = fn(&[String], &RandomService) -> Result<String, EvalError>;

/// Registry of builtin directives, keyed by lowercase name.
pub struct BuiltinRegistry {
    builtins: HashMap<&'static str, BuiltinFn>,
}

impl BuiltinRegistry {
    /// Create a registry holding the standard builtins.
    pub fn new() -> Self {
        let mut builtins: HashMap<&'static str, BuiltinFn> = HashMap::new();
        builtins.insert("numerify", numerify);
        builtins.insert("letterify", letterify);
        builtins.insert("bothify", bothify);
        builtins.insert("regexify", regexify);
        builtins.insert("examplify", examplify);
        builtins.insert("templatify", templatify);
        Self { builtins }
    }

    /// Look up a builtin by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<BuiltinFn> {
        self.builtins.get(name.to_lowercase().as_str()).copied()
    }

    /// Sorted names of every builtin.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.builtins.keys().map(ToString::to_string).collect();
        names.sort();
        names
    }

    /// Run the builtin `name` with `args`.
    ///
    /// Unknown names produce [`EvalError::UnknownBuiltin`] with suggestions.
    pub fn call(
        &self,
        name: &str,
        args: &[String],
        random: &RandomService,
    ) -> Result<String, EvalError> {
        let Some(builtin) = self.get(name) else {
            return Err(EvalError::UnknownBuiltin {
                name: name.to_string(),
                suggestions: compute_suggestions(&name.to_lowercase(), &self.names()),
            });
        };
        builtin(args, random)
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn expect_args(
    directive: &str,
    args: &[String],
    min: usize,
    max: Option<usize>,
) -> Result<(), EvalError> {
    let within = args.len() >= min && max.is_none_or(|max| args.len() <= max);
    if within {
        return Ok(());
    }
    let expected = match max {
        Some(max) if max == min => min.to_string(),
        Some(max) => format!("{min} to {max}"),
        None => format!("at least {min}"),
    };
    Err(EvalError::ArgumentCount {
        directive: directive.to_string(),
        expected,
        got: args.len(),
    })
}

fn parse_bool(value: &str) -> Result<bool, EvalError> {
    match value.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(EvalError::invalid_argument(format!(
            "expected 'true' or 'false', got '{value}'"
        ))),
    }
}

fn optional_case(args: &[String]) -> Result<Option<bool>, EvalError> {
    args.get(1).map(|value| parse_bool(value)).transpose()
}

fn numerify(args: &[String], random: &RandomService) -> Result<String, EvalError> {
    expect_args("numerify", args, 1, Some(1))?;
    Ok(random.with_rng(|rng| generators::numerify(&args[0], rng)))
}

fn letterify(args: &[String], random: &RandomService) -> Result<String, EvalError> {
    expect_args("letterify", args, 1, Some(2))?;
    let upper = optional_case(args)?;
    Ok(random.with_rng(|rng| generators::letterify(&args[0], upper, rng)))
}

fn bothify(args: &[String], random: &RandomService) -> Result<String, EvalError> {
    expect_args("bothify", args, 1, Some(2))?;
    let upper = optional_case(args)?;
    Ok(random.with_rng(|rng| generators::bothify(&args[0], upper, rng)))
}

fn regexify(args: &[String], random: &RandomService) -> Result<String, EvalError> {
    expect_args("regexify", args, 1, Some(1))?;
    random.with_rng(|rng| generators::regexify(&args[0], rng))
}

fn examplify(args: &[String], random: &RandomService) -> Result<String, EvalError> {
    expect_args("examplify", args, 1, Some(1))?;
    Ok(random.with_rng(|rng| generators::examplify(&args[0], rng)))
}

/// `#{templatify 'template', 'c', 'option', ...}`
fn templatify(args: &[String], random: &RandomService) -> Result<String, EvalError> {
    expect_args("templatify", args, 3, None)?;
    let mut chars = args[1].chars();
    let (Some(placeholder), None) = (chars.next(), chars.next()) else {
        return Err(EvalError::invalid_argument(format!(
            "placeholder must be a single character, got '{}'",
            args[1]
        )));
    };
    random.with_rng(|rng| generators::templatify(&args[0], placeholder, &args[2..], rng))
}
