//! Expression evaluation engine.
//!
//! Walks a parsed [`Template`], running builtins and provider calls for each
//! directive. Any directive output that itself contains `#{` is parsed and
//! evaluated again before it is spliced into the result.

use tracing::trace;

use crate::interpreter::providers::method_key;
use crate::interpreter::{EvalContext, EvalError, Faker};
use crate::parser::ast::{Argument, Directive, Segment, Template};
use crate::parser::{has_directive, parse_expression};

/// Evaluate an expression string.
///
/// Text without a directive marker is returned unchanged.
///
/// # Errors
///
/// Returns [`EvalError::DirectiveSyntax`] for malformed directives, and any
/// error raised while evaluating them. No partial output is produced.
pub fn eval_str(text: &str, faker: &Faker, ctx: &mut EvalContext) -> Result<String, EvalError> {
    if !has_directive(text) {
        return Ok(text.to_string());
    }
    let template = parse_expression(text).map_err(|source| EvalError::DirectiveSyntax {
        expression: text.to_string(),
        source,
    })?;
    eval_template(&template, faker, ctx)
}

/// Evaluate a parsed template, concatenating literal and directive output.
pub fn eval_template(
    template: &Template,
    faker: &Faker,
    ctx: &mut EvalContext,
) -> Result<String, EvalError> {
    let mut output = String::new();
    for segment in &template.segments {
        match segment {
            Segment::Literal(text) => output.push_str(text),
            Segment::Directive(directive) => {
                output.push_str(&eval_directive(directive, faker, ctx)?);
            }
        }
    }
    Ok(output)
}

/// Evaluate one directive.
///
/// The directive stays on the context stack while its arguments, its call
/// and the re-evaluation of its output run, so all of them count towards
/// the depth limit.
pub fn eval_directive(
    directive: &Directive,
    faker: &Faker,
    ctx: &mut EvalContext,
) -> Result<String, EvalError> {
    let label = directive.label();
    ctx.push_call(&label)?;
    trace!(directive = %label, depth = ctx.depth(), "evaluating directive");

    let args = eval_args(directive.args(), faker, ctx)?;
    let raw = match directive {
        Directive::Builtin { name, .. } => match sibling_key(name, &args, faker, ctx) {
            Some(key) => faker.resolve_in(&key, ctx)?,
            None => faker.builtins().call(name, &args, faker.random())?,
        },
        Directive::Provider {
            provider, method, ..
        } => {
            let instance = faker.registry().get(provider, faker.cache())?;
            instance.call(&method_key(method), &args, faker, ctx)?
        }
    };
    let result = eval_str(&raw, faker, ctx)?;

    ctx.pop_call();
    Ok(result)
}

/// A bare `#{first_name}` inside `name.*` data refers to `name.first_name`
/// when no builtin of that name exists.
fn sibling_key(name: &str, args: &[String], faker: &Faker, ctx: &EvalContext) -> Option<String> {
    if !args.is_empty() || faker.builtins().get(name).is_some() {
        return None;
    }
    let key = format!("{}.{name}", ctx.current_category()?);
    faker.has_key(&key).then_some(key)
}

/// Evaluate nested arguments; quoted arguments pass through verbatim.
fn eval_args(
    args: &[Argument],
    faker: &Faker,
    ctx: &mut EvalContext,
) -> Result<Vec<String>, EvalError> {
    args.iter()
        .map(|arg| match arg {
            Argument::Literal(text) => Ok(text.clone()),
            Argument::Nested(directive) => eval_directive(directive, faker, ctx),
        })
        .collect()
}
