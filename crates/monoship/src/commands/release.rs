use std::path::Path;

use monoship_core::RunMode;
use monoship_operations::operations::{
    PlanInput, PublishInput, ReleaseInput, ReleaseOperation, ReleaseOutcome,
};
use monoship_operations::providers::{
    DelayGate, FileSystemProjectProvider, Git2Provider, NpmRegistry, ProcessEnvironment,
    ProcessRunner, ThreadSleeper,
};
use monoship_operations::traits::{ConfirmationGate, ProjectProvider};
use monoship_project::{GateMode, MonoshipConfig};
use tracing::debug;

use super::ReleaseArgs;
use crate::environment::{self, NonInteractiveReason};
use crate::error::{CliError, Result};
use crate::interaction::TerminalGate;
use crate::output;

pub(crate) fn run(args: &ReleaseArgs, start_path: &Path) -> Result<()> {
    let project_provider = FileSystemProjectProvider::new();
    let (root, config) = project_provider.load_config(start_path)?;
    let gate = select_gate(
        args,
        &config,
        environment::current_non_interactive_reason().as_ref(),
    )?;

    let operation = ReleaseOperation::new(
        project_provider,
        Git2Provider::new(),
        ProcessRunner,
        NpmRegistry::new(ProcessRunner, root),
        ProcessEnvironment,
        gate,
    );
    let input = ReleaseInput {
        mode: if args.publish {
            RunMode::Publish
        } else {
            RunMode::Test
        },
        plan: PlanInput {
            all_repos: args.all_repos,
            skip_batches: args.skip_batches,
        },
        publish: PublishInput {
            concurrency: args.concurrency.map(usize::from),
            dry_run: args.dry_run,
        },
    };

    let outcome = operation.execute(start_path, &input)?;
    print_outcome(&outcome);

    Ok(())
}

fn print_outcome(outcome: &ReleaseOutcome) {
    match outcome {
        ReleaseOutcome::Tested { output, .. } => print!("{}", output::format_test_output(output)),
        ReleaseOutcome::Published { outcome, .. } => {
            print!("{}", output::format_publish_outcome(outcome));
        }
    }
}

fn select_gate(
    args: &ReleaseArgs,
    config: &MonoshipConfig,
    non_interactive: Option<&NonInteractiveReason>,
) -> Result<Box<dyn ConfirmationGate>> {
    let delay = || -> Box<dyn ConfirmationGate> {
        Box::new(DelayGate::new(config.delays(), ThreadSleeper))
    };

    // The gate is only consulted for a real publish.
    if args.yes || !args.publish || args.dry_run {
        return Ok(delay());
    }

    let mode = config.gate();
    debug!(?mode, ?non_interactive, "selecting confirmation gate");

    match (mode, non_interactive) {
        (GateMode::Delay, _)
        | (GateMode::Auto, Some(_))
        | (_, Some(NonInteractiveReason::CiDetected { .. })) => Ok(delay()),
        (GateMode::Auto | GateMode::Prompt, None) => Ok(Box::new(TerminalGate)),
        (GateMode::Prompt, Some(_)) => Err(CliError::NotATty),
    }
}
