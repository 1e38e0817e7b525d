mod bootstrap;
mod plan;
mod release;

use std::path::Path;

use clap::{Args, Subcommand};

use crate::error::Result;
use crate::output::OutputFormat;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Clone the configured repositories, then install and build each one
    Bootstrap(BootstrapArgs),
    /// Test the affected packages, or publish them with --publish
    Release(ReleaseArgs),
    /// Show the affected packages and their batches without running anything
    Plan(PlanArgs),
}

#[derive(Args)]
pub(crate) struct BootstrapArgs {
    /// Remove node_modules before installing
    #[arg(long)]
    pub clean: bool,
}

#[derive(Args)]
pub(crate) struct ReleaseArgs {
    /// Publish instead of running the test scripts
    #[arg(long)]
    pub publish: bool,

    /// Use the latest commit of every repository, not only the newest one
    #[arg(long)]
    pub all_repos: bool,

    /// Print what would be published without running anything
    #[arg(long, requires = "publish")]
    pub dry_run: bool,

    /// Skip the confirmation prompt and publish after the configured delay
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Packages published in parallel within a batch
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: Option<u16>,

    /// Leading batches to leave out
    #[arg(long, value_name = "N")]
    pub skip_batches: Option<usize>,
}

#[derive(Args)]
pub(crate) struct PlanArgs {
    /// Use the latest commit of every repository, not only the newest one
    #[arg(long)]
    pub all_repos: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,
}

impl Commands {
    pub(crate) fn execute(self, start_path: &Path) -> Result<()> {
        match self {
            Self::Bootstrap(args) => bootstrap::run(&args, start_path),
            Self::Release(args) => release::run(&args, start_path),
            Self::Plan(args) => plan::run(&args, start_path),
        }
    }
}
