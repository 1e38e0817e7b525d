use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Operation(#[from] monoship_operations::OperationError),

    #[error("failed to determine the start directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("failed to render JSON output")]
    Json(#[from] serde_json::Error),

    #[error("gate = \"prompt\" requires an interactive terminal (pass --yes to publish after a delay)")]
    NotATty,
}

pub type Result<T> = std::result::Result<T, CliError>;
