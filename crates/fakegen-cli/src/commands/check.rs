//! Implementation of the `fakegen check` command.

use std::collections::BTreeSet;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use fakegen::compute_suggestions;
use fakegen::data::{parse_yaml, DataNode};
use fakegen::interpreter::BuiltinRegistry;
use fakegen::parser::ast::{Argument, Directive, Segment};
use fakegen::parser::{has_directive, parse_expression, parse_regex};
use miette::{IntoDiagnostic, Report};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::debug;

use crate::output::ExpressionDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Data files to check (.yml)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One problem found by the checker.
#[derive(Debug, Serialize)]
struct Issue {
    file: String,
    key: Option<String>,
    message: String,
    #[serde(skip)]
    diagnostic: Option<ExpressionDiagnostic>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let builtins = BuiltinRegistry::new();
    let mut issues = Vec::new();

    for path in &args.files {
        let file = path.display().to_string();
        let before = issues.len();
        match read_to_string(path) {
            Ok(content) => check_file(path, &content, &builtins, &mut issues),
            Err(e) => issues.push(Issue {
                file: file.clone(),
                key: None,
                message: format!("cannot read file: {}", e),
                diagnostic: None,
            }),
        }
        debug!(file = %file, issues = issues.len() - before, "checked data file");
        if !args.json && issues.len() == before {
            println!("{} {}", "✓".green(), file);
        }
    }

    let failed = !issues.is_empty();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&issues).into_diagnostic()?);
    } else {
        for issue in issues {
            match issue.diagnostic {
                Some(diagnostic) => eprintln!("{:?}", Report::new(diagnostic)),
                None => eprintln!("{} {}: {}", "✗".red(), issue.file, issue.message),
            }
        }
    }

    if failed {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

/// Parse one data file and check every value in it.
fn check_file(path: &Path, content: &str, builtins: &BuiltinRegistry, issues: &mut Vec<Issue>) {
    let file = path.display().to_string();
    let root = match parse_yaml(content, path) {
        Ok(root) => root,
        Err(e) => {
            issues.push(Issue {
                file,
                key: None,
                message: e.to_string(),
                diagnostic: None,
            });
            return;
        }
    };

    let mut values = Vec::new();
    collect_values(&root, "", &mut values);
    let keys: BTreeSet<String> = values.iter().map(|(key, _)| key.clone()).collect();
    for (key, value) in values {
        if let Some(diagnostic) = check_expression(&file, &key, value, builtins, &keys) {
            issues.push(Issue {
                file: file.clone(),
                key: Some(key),
                message: diagnostic.message().to_string(),
                diagnostic: Some(diagnostic),
            });
        }
    }
}

/// Flatten a data tree into `(dotted key, value)` pairs.
fn collect_values<'a>(node: &'a DataNode, prefix: &str, out: &mut Vec<(String, &'a str)>) {
    match node {
        DataNode::Table(children) => {
            for (name, child) in children {
                let key = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{}.{}", prefix, name)
                };
                collect_values(child, &key, out);
            }
        }
        DataNode::Text(text) => out.push((prefix.to_string(), text)),
        DataNode::List(items) => {
            out.extend(items.iter().map(|item| (prefix.to_string(), item.as_str())));
        }
    }
}

/// Check directive syntax, builtin names and literal regexify patterns.
///
/// A bare name that is not a builtin passes when `keys` holds the sibling key
/// it resolves to (`#{first_name}` under `name.*` is `name.first_name`).
fn check_expression(
    file: &str,
    key: &str,
    expression: &str,
    builtins: &BuiltinRegistry,
    keys: &BTreeSet<String>,
) -> Option<ExpressionDiagnostic> {
    let category = key.split_once('.').map_or(key, |(category, _)| category);
    if !has_directive(expression) {
        return None;
    }
    let origin = format!("{} ({})", file, key);
    let template = match parse_expression(expression) {
        Ok(template) => template,
        Err(e) => return Some(ExpressionDiagnostic::from_parse_error(&origin, expression, &e)),
    };
    let mut directives: Vec<&Directive> = template
        .segments
        .iter()
        .filter_map(|segment| match segment {
            Segment::Directive(directive) => Some(directive),
            Segment::Literal(_) => None,
        })
        .collect();

    while let Some(directive) = directives.pop() {
        for arg in directive.args() {
            if let Argument::Nested(nested) = arg {
                directives.push(nested);
            }
        }
        let Directive::Builtin { name, args } = directive else {
            continue;
        };
        if builtins.get(name).is_none() {
            let sibling = format!("{}.{}", category, name.to_lowercase());
            if args.is_empty() && keys.contains(&sibling) {
                continue;
            }
            let suggestions = compute_suggestions(&name.to_lowercase(), &builtins.names());
            let mut message = format!("unknown builtin '{}'", name);
            if !suggestions.is_empty() {
                message.push_str(&format!(", did you mean: {}?", suggestions.join(", ")));
            }
            return Some(ExpressionDiagnostic::from_message(&origin, expression, message));
        }
        if name.eq_ignore_ascii_case("regexify") {
            if let Some(Argument::Literal(pattern)) = args.first() {
                if let Err(e) = parse_regex(pattern) {
                    return Some(ExpressionDiagnostic::from_message(
                        &origin,
                        expression,
                        format!("invalid pattern '{}': {}", pattern, e),
                    ));
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(expression: &str) -> Option<String> {
        check_expression("f.yml", "k", expression, &BuiltinRegistry::new(), &BTreeSet::new())
            .map(|d| d.message().to_string())
    }

    #[test]
    fn sibling_keys_are_not_unknown_builtins() {
        let keys = BTreeSet::from(["name.first_name".to_string(), "name.name".to_string()]);
        let builtins = BuiltinRegistry::new();
        let check_in = |key: &str, expression: &str| {
            check_expression("f.yml", key, expression, &builtins, &keys)
                .map(|d| d.message().to_string())
        };
        assert_eq!(check_in("name.name", "#{first_name}"), None);
        assert!(check_in("name.name", "#{last_name}").is_some());
        assert!(check_in("other.name", "#{first_name}").is_some());
    }

    #[test]
    fn plain_text_passes() {
        assert_eq!(check("just text"), None);
        assert_eq!(check("#{numerify '###'}"), None);
    }

    #[test]
    fn unknown_builtin_is_reported() {
        let message = check("#{numerfy '#'}").unwrap();
        assert_eq!(message, "unknown builtin 'numerfy', did you mean: numerify?");
    }

    #[test]
    fn bad_pattern_is_reported() {
        let message = check("#{regexify '[a-'}").unwrap();
        assert!(message.starts_with("invalid pattern '[a-'"));
    }

    #[test]
    fn nested_directives_are_checked() {
        assert!(check("#{examplify #{bogus}}").is_some());
    }

    #[test]
    fn syntax_errors_are_reported() {
        assert!(check("#{numerify '#' x}").unwrap().starts_with("syntax error"));
        assert_eq!(
            check("#{numerify '###'").as_deref(),
            Some("unexpected end of expression")
        );
    }
}
