use std::path::PathBuf;

use monoship_git::GitError;
use monoship_graph::GraphError;
use monoship_project::ProjectError;
use monoship_version::VersionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error("command `{command}` failed in '{}' ({status}){}", cwd.display(), format_output(output))]
    CommandFailed {
        command: String,
        cwd: PathBuf,
        status: String,
        output: String,
    },

    #[error("failed to start `{command}` in '{}'", cwd.display())]
    CommandSpawn {
        command: String,
        cwd: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("registry returned an invalid version '{value}' for {package}@{tag}")]
    RegistryVersion {
        package: String,
        tag: String,
        value: String,
        #[source]
        source: semver::Error,
    },

    #[error("failed to remove '{}'", path.display())]
    RemoveDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create '{}'", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build publish worker pool")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("package '{0}' is not part of the workspace")]
    UnknownPackage(String),

    #[error("failed to read confirmation")]
    Prompt(#[source] std::io::Error),

    #[error("operation cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, OperationError>;

fn format_output(output: &str) -> String {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(":\n{trimmed}")
    }
}
