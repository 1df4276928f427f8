//! CLI command implementations.

mod check;
mod coverage;
mod eval;

use std::path::PathBuf;

pub use check::{run_check, CheckArgs};
pub use coverage::{run_coverage, CoverageArgs};
pub use eval::{run_eval, EvalArgs};

/// A data file tagged with the locale it belongs to.
#[derive(Debug, Clone)]
pub struct LocaleFile {
    pub locale: String,
    pub path: PathBuf,
}

/// Parse a `locale=path` argument.
pub fn parse_locale_file(s: &str) -> Result<LocaleFile, String> {
    let (locale, path) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid data file '{}': expected locale=path", s))?;
    if locale.is_empty() || path.is_empty() {
        return Err(format!("invalid data file '{}': expected locale=path", s));
    }
    Ok(LocaleFile {
        locale: locale.to_string(),
        path: PathBuf::from(path),
    })
}
