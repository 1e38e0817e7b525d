mod error;
mod repository;
mod types;

pub use error::GitError;
pub use repository::Repository;
pub use types::{CommitInfo, FileChange, FileStatus};

use std::path::Path;

pub type Result<T> = std::result::Result<T, GitError>;

/// # Errors
///
/// Returns an error if the path is not a git repository or has no commits.
pub fn latest_commit(path: &Path) -> Result<CommitInfo> {
    Repository::open(path)?.head_commit()
}
