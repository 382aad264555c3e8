//! keyscan command line interface

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AnalyzeArgs, ValidateArgs, handle_analyze, handle_validate};

#[derive(Parser)]
#[command(
    name = "keyscan",
    version,
    about = "Primary key discovery and identifier validation for JSON lines files"
)]
struct Cli {
    /// Log progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect primary key candidates in every matching file
    Analyze(AnalyzeArgs),
    /// Check that an identifier field is unique across every matching file
    Validate(ValidateArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Validate(args) => handle_validate(args),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
