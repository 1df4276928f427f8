//! Implementation of the `fakegen eval` command.

use fakegen::{Faker, LoadError, LocaleChain, RandomService};
use miette::IntoDiagnostic;
use serde::Serialize;
use tracing::debug;

use super::{parse_locale_file, LocaleFile};

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Locale to generate for (e.g., en, en-GB, de-AT)
    #[arg(long, default_value = "en")]
    pub locale: String,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Extra data files in locale=path format (repeatable)
    #[arg(long = "data", value_parser = parse_locale_file)]
    pub data: Vec<LocaleFile>,

    /// Skip the bundled locale data
    #[arg(long)]
    pub no_builtin: bool,

    /// Maximum directive nesting depth
    #[arg(long, default_value_t = fakegen::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Number of values to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Expression to evaluate, e.g. "#{Name.first_name} #{numerify '###'}"
    #[arg(long, required_unless_present = "key", conflicts_with = "key")]
    pub expr: Option<String>,

    /// Dotted data key to resolve, e.g. englandfootball.teams
    #[arg(long)]
    pub key: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult<'a> {
    pub locale_chain: &'a LocaleChain,
    pub values: Vec<String>,
}

/// Run the eval command.
///
/// Setup failures exit with a code naming their cause (see
/// [`load_error_code`]); generation failures exit with `DATAERR`.
pub fn run_eval(args: EvalArgs) -> miette::Result<i32> {
    let faker = match build_faker(&args) {
        Ok(faker) => faker,
        Err(e) => {
            report_error("Configuration error", &e.to_string(), args.json)?;
            return Ok(load_error_code(&e));
        }
    };

    let generated: Result<Vec<String>, _> = (0..args.count)
        .map(|_| match (&args.expr, &args.key) {
            (Some(expr), _) => faker.expression(expr),
            (None, Some(key)) => faker.resolve(key),
            (None, None) => faker.expression(""),
        })
        .collect();

    match generated {
        Ok(values) => {
            if args.json {
                let output = EvalResult {
                    locale_chain: faker.locale_chain(),
                    values,
                };
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                for value in values {
                    println!("{}", value);
                }
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            report_error("Evaluation error", &e.to_string(), args.json)?;
            Ok(exitcode::DATAERR)
        }
    }
}

fn build_faker(args: &EvalArgs) -> Result<Faker, LoadError> {
    let random = args.seed.map(RandomService::seeded).unwrap_or_default();
    let mut faker = Faker::builder()
        .locale(args.locale.as_str())
        .random(random)
        .max_depth(args.max_depth)
        .builtin_data(!args.no_builtin)
        .build()?;
    for file in &args.data {
        debug!(locale = %file.locale, path = %file.path.display(), "loading data file");
        faker.add_data_source(&file.locale, &file.path)?;
    }
    Ok(faker)
}

/// Exit code for a failure to set up the faker.
fn load_error_code(error: &LoadError) -> i32 {
    match error {
        LoadError::Io { .. } => exitcode::NOINPUT,
        LoadError::Parse { .. } => exitcode::DATAERR,
        LoadError::InvalidLocale { .. } => exitcode::USAGE,
    }
}

fn report_error(kind: &str, message: &str, json: bool) -> miette::Result<()> {
    if json {
        let output = serde_json::json!({ "error": message });
        eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        eprintln!("{kind}: {message}");
    }
    Ok(())
}
