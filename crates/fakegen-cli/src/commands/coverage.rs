//! Coverage command implementation.

use std::collections::BTreeSet;

use clap::Args;
use fakegen::data::{load_file, DataStore};
use fakegen::LocaleChain;
use miette::{miette, IntoDiagnostic, Result};
use serde::Serialize;

use super::{parse_locale_file, LocaleFile};
use crate::output::table::{format_coverage_table, LocaleCoverage};

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Reference data file in locale=path format (e.g., en=data/en.yml).
    #[arg(long, value_parser = parse_locale_file)]
    pub source: LocaleFile,

    /// Data files to compare against the source, in locale=path format.
    #[arg(long, value_parser = parse_locale_file, required = true)]
    pub target: Vec<LocaleFile>,

    /// Exit with non-zero code if any locale is missing keys.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson {
    locale: String,
    covered: usize,
    total: usize,
    missing: Vec<String>,
    extra: usize,
}

/// Load `file` and return its normalized locale and sorted keys.
fn load_keys(file: &LocaleFile) -> Result<(String, Vec<String>)> {
    let locale = LocaleChain::for_locale(&file.locale)
        .map_err(|e| miette!("{}", e))?
        .primary()
        .to_string();
    let node = load_file(&file.path).map_err(|e| miette!("{}", e))?;
    let mut store = DataStore::new();
    store.merge_source(&locale, node);
    let keys = store.keys(&locale);
    Ok((locale, keys))
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let (_, source_keys) = load_keys(&args.source)?;
    let source_set: BTreeSet<&str> = source_keys.iter().map(String::as_str).collect();

    let mut coverage_data = Vec::new();
    for target in &args.target {
        let (locale, keys) = load_keys(target)?;
        let target_set: BTreeSet<&str> = keys.iter().map(String::as_str).collect();
        let missing: Vec<String> = source_set
            .difference(&target_set)
            .map(ToString::to_string)
            .collect();
        coverage_data.push(LocaleCoverage {
            locale,
            covered: source_set.intersection(&target_set).count(),
            extra: target_set.difference(&source_set).count(),
            missing,
        });
    }

    let any_incomplete = coverage_data.iter().any(|c| !c.missing.is_empty());

    if args.json {
        let json_data: Vec<CoverageJson> = coverage_data
            .iter()
            .map(|c| CoverageJson {
                locale: c.locale.clone(),
                covered: c.covered,
                total: source_set.len(),
                missing: c.missing.clone(),
                extra: c.extra,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json_data).into_diagnostic()?);
    } else {
        println!("{}", format_coverage_table(source_set.len(), &coverage_data));

        for locale_coverage in &coverage_data {
            if !locale_coverage.missing.is_empty() {
                println!("\nMissing in {}:", locale_coverage.locale);
                for key in &locale_coverage.missing {
                    println!("  - {}", key);
                }
            }
        }
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
