mod commands;
mod environment;
mod error;
mod interaction;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use monoship_core::{CurrentDirProvider, FixedPathProvider, StartPathProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::commands::Commands;
use crate::error::CliError;

const LOG_ENV: &str = "MONOSHIP_LOG";

#[derive(Parser)]
#[command(name = "monoship")]
#[command(version = env!("MONOSHIP_VERSION"))]
#[command(
    about = "Test and publish the packages affected by the latest commit, in dependency order",
    long_about = None
)]
struct Cli {
    /// Path to start workspace discovery from (default: current directory)
    #[arg(long = "path", short = 'C', global = true)]
    path: Option<PathBuf>,

    /// Log debug output (overridden by MONOSHIP_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let start_path = match resolve_start_path(cli.path) {
        Ok(path) => path,
        Err(e) => {
            print_error(&e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = cli.command.execute(&start_path) {
        print_error(&e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn resolve_start_path(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    let provider: Box<dyn StartPathProvider> = match path {
        Some(p) => Box::new(FixedPathProvider::new(p)),
        None => Box::new(CurrentDirProvider),
    };
    provider.start_path().map_err(CliError::CurrentDir)
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}
