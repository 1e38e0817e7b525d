use std::path::Path;

use monoship_core::RunMode;
use tracing::info;

use super::plan::{PlanInput, PlanOperation, PlanOutput};
use super::publish::{PublishInput, PublishOperation, PublishOutcome};
use super::run_tests::{TestOperation, TestOutput};
use crate::Result;
use crate::traits::{
    CommandRunner, ConfirmationGate, EnvironmentProvider, GitProvider, ProjectProvider,
    RegistryProvider,
};

#[derive(Debug, Clone, Default)]
pub struct ReleaseInput {
    pub mode: RunMode,
    pub plan: PlanInput,
    pub publish: PublishInput,
}

#[derive(Debug, Clone)]
pub enum ReleaseOutcome {
    Tested {
        plan: PlanOutput,
        output: TestOutput,
    },
    Published {
        plan: PlanOutput,
        outcome: PublishOutcome,
    },
}

impl ReleaseOutcome {
    #[must_use]
    pub fn plan(&self) -> &PlanOutput {
        match self {
            Self::Tested { plan, .. } | Self::Published { plan, .. } => plan,
        }
    }
}

/// Plans the affected packages, then tests or publishes them.
pub struct ReleaseOperation<P, G, R, Reg, E, Gt> {
    planner: PlanOperation<P, G>,
    tests: TestOperation<R>,
    publisher: PublishOperation<R, Reg, E, Gt>,
}

impl<P, G, R, Reg, E, Gt> ReleaseOperation<P, G, R, Reg, E, Gt>
where
    P: ProjectProvider,
    G: GitProvider,
    R: CommandRunner + Clone,
    Reg: RegistryProvider,
    E: EnvironmentProvider,
    Gt: ConfirmationGate,
{
    pub fn new(
        project_provider: P,
        git_provider: G,
        runner: R,
        registry: Reg,
        environment: E,
        gate: Gt,
    ) -> Self {
        Self {
            planner: PlanOperation::new(project_provider, git_provider),
            tests: TestOperation::new(runner.clone()),
            publisher: PublishOperation::new(runner, registry, environment, gate),
        }
    }

    /// # Errors
    ///
    /// Returns the first error of planning, testing or publishing.
    pub fn execute(&self, start_path: &Path, input: &ReleaseInput) -> Result<ReleaseOutcome> {
        let plan = self.planner.execute(start_path, &input.plan)?;

        match input.mode {
            RunMode::Test => {
                info!(packages = plan.order.packages().count(), "running tests");
                let output = self.tests.execute(&plan.workspace, &plan.order)?;
                Ok(ReleaseOutcome::Tested { plan, output })
            }
            RunMode::Publish => {
                let outcome = self
                    .publisher
                    .execute(&plan.workspace, &plan.order, &input.publish)?;
                Ok(ReleaseOutcome::Published { plan, outcome })
            }
        }
    }
}
