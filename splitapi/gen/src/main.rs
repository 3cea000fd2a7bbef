//! Splitapi Code Generator
//!
//! Generates a typed endpoint module from an OpenAPI document.

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use splitapi_gen::config::load_config;
use splitapi_gen::errors::GeneratorError;
use splitapi_gen::output::{OutputMode, run};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Splitapi code generator - turns an OpenAPI document into typed splitapi endpoints
#[derive(Parser, Debug)]
#[command(name = "splitapi-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Generator configuration file (TOML or JSON)
    #[arg(short, long, default_value = "openapi-config.toml")]
    config: PathBuf,

    /// Print generated code without writing files
    #[arg(long, conflicts_with = "check")]
    dry_run: bool,

    /// Fail if the generated file is out of date instead of writing it
    #[arg(long)]
    check: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Initialize tracing subscriber based on verbosity level.
///
/// `RUST_LOG` takes precedence. Otherwise:
/// - 0 (default): WARN only
/// - 1 (-v): INFO
/// - 2 (-vv): DEBUG
/// - 3+ (-vvv): TRACE
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,splitapi_gen=info".to_string(),
            2 => "info,splitapi_gen=debug".to_string(),
            _ => "debug,splitapi_gen=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mode = if cli.dry_run {
        OutputMode::DryRun
    } else if cli.check {
        OutputMode::Check
    } else {
        OutputMode::Write
    };

    let resolved = load_config(&cli.config)?;
    let code = run(&resolved, mode)?;
    let output = resolved.output_path();

    match mode {
        OutputMode::DryRun => println!("{}", code),
        OutputMode::Check => {
            eprintln!("{} {} is up to date", "✓".green(), output.display());
        }
        OutputMode::Write => {
            eprintln!("{} Generated {}", "✓".green(), output.display());
        }
    }

    Ok(())
}
