use std::path::Path;

use monoship_operations::operations::{BootstrapInput, BootstrapOperation};
use monoship_operations::providers::{FileSystemProjectProvider, ProcessRunner, StdFileSystem};

use super::BootstrapArgs;
use crate::error::Result;
use crate::output;

pub(crate) fn run(args: &BootstrapArgs, start_path: &Path) -> Result<()> {
    let operation =
        BootstrapOperation::new(FileSystemProjectProvider::new(), ProcessRunner, StdFileSystem);
    let input = BootstrapInput { clean: args.clean };

    let result = operation.execute(start_path, &input)?;
    print!("{}", output::format_bootstrap(&result));

    Ok(())
}
