//! fakegen CLI entry point.
//!
//! Provides command-line tools for fake data expressions and locale data files:
//! - `fakegen eval` - Generate values from an expression or data key
//! - `fakegen check` - Validate data files and the directives inside them
//! - `fakegen coverage` - Report which keys each locale is missing

mod commands;
mod output;

use std::io;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{run_check, run_coverage, run_eval, CheckArgs, CoverageArgs, EvalArgs};
use tracing_subscriber::EnvFilter;

/// Fake data generation tools.
#[derive(Debug, Parser)]
#[command(name = "fakegen")]
#[command(about = "Fake data generation tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate values from an expression or a data key
    Eval(EvalArgs),
    /// Check locale data files and their directives
    Check(CheckArgs),
    /// Report key coverage across locales
    Coverage(CoverageArgs),
}

impl ColorWhen {
    /// Force colors on or off; `Auto` leaves TTY and `NO_COLOR` detection
    /// to owo-colors.
    fn apply(self) {
        match self {
            ColorWhen::Auto => {}
            ColorWhen::Always => owo_colors::set_override(true),
            ColorWhen::Never => owo_colors::set_override(false),
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` or the verbosity flag.
fn setup_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Run one subcommand, returning its exit code.
///
/// Each command reports its own expected failures and picks an exit code
/// for them. An `Err` here means the CLI itself failed.
fn run(command: Commands) -> miette::Result<i32> {
    match command {
        Commands::Eval(args) => run_eval(args),
        Commands::Check(args) => run_check(args),
        Commands::Coverage(args) => run_coverage(args),
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();
    setup_tracing(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .unicode(true)
                .context_lines(1)
                .build(),
        )
    }))?;

    let code = run(cli.command).unwrap_or_else(|e| {
        eprintln!("{e:?}");
        exitcode::SOFTWARE
    });
    exit(code)
}
