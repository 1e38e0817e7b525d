use std::process::{Command, Stdio};
use std::time::Instant;

use tracing::debug;

use crate::traits::{CommandOutput, CommandRunner, CommandSpec};
use crate::{OperationError, Result};

/// Runs commands as child processes, capturing their output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        debug!(command = %spec, cwd = %spec.cwd.display(), "running command");
        let start = Instant::now();

        let output = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(&spec.cwd)
            .envs(spec.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| OperationError::CommandSpawn {
                command: spec.to_string(),
                cwd: spec.cwd.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        debug!(
            command = %spec,
            status = %output.status,
            elapsed_ms = start.elapsed().as_millis(),
            "command finished"
        );

        if !output.status.success() {
            return Err(OperationError::CommandFailed {
                command: spec.to_string(),
                cwd: spec.cwd.clone(),
                status: output.status.to_string(),
                output: join_output(&stderr, &stdout),
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }
}

fn join_output(stderr: &str, stdout: &str) -> String {
    match (stderr.trim().is_empty(), stdout.trim().is_empty()) {
        (true, _) => stdout.to_string(),
        (false, true) => stderr.to_string(),
        (false, false) => format!("{stderr}\n{stdout}"),
    }
}
