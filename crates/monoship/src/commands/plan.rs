use std::path::Path;

use monoship_operations::operations::{PlanInput, PlanOperation};
use monoship_operations::providers::{FileSystemProjectProvider, Git2Provider};

use super::PlanArgs;
use crate::error::Result;

pub(crate) fn run(args: &PlanArgs, start_path: &Path) -> Result<()> {
    let operation = PlanOperation::new(FileSystemProjectProvider::new(), Git2Provider::new());
    let input = PlanInput {
        all_repos: args.all_repos,
        skip_batches: None,
    };

    let plan = operation.execute(start_path, &input)?;
    print!("{}", args.format.plan_formatter().format_plan(&plan)?);

    Ok(())
}
