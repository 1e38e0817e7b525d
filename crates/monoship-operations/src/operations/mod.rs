mod bootstrap;
mod changes;
mod commands;
mod plan;
mod publish;
mod release;

pub use bootstrap::{BootstrapInput, BootstrapOperation, BootstrapOutput};
pub use changes::{ChangeCollector, ChangeSet, RepoChanges};
pub use plan::{PlanInput, PlanOperation, PlanOutput};
pub use publish::{PublishInput, PublishOperation, PublishOutcome};
pub use release::{ReleaseInput, ReleaseOperation, ReleaseOutcome};
pub use run_tests::{TestOperation, TestOutput};
