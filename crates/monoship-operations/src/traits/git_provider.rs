use std::path::Path;

use monoship_git::{CommitInfo, FileChange};

use crate::Result;

pub trait GitProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or has no commits.
    fn latest_commit(&self, repo_dir: &Path) -> Result<CommitInfo>;

    /// Files changed by `sha` relative to its first parent.
    ///
    /// Paths are relative to `repo_dir`, which need not be the root of the
    /// repository. Files outside `repo_dir` are reported with absolute paths.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or the diff fails.
    fn commit_changed_files(&self, repo_dir: &Path, sha: &str) -> Result<Vec<FileChange>>;
}

impl<T: GitProvider + ?Sized> GitProvider for &T {
    fn latest_commit(&self, repo_dir: &Path) -> Result<CommitInfo> {
        (**self).latest_commit(repo_dir)
    }

    fn commit_changed_files(&self, repo_dir: &Path, sha: &str) -> Result<Vec<FileChange>> {
        (**self).commit_changed_files(repo_dir, sha)
    }
}
