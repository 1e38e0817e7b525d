use std::path::Path;

use monoship_git::{CommitInfo, FileChange, Repository};

use crate::Result;
use crate::traits::GitProvider;

pub struct Git2Provider;

impl Git2Provider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Git2Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for Git2Provider {
    fn latest_commit(&self, repo_dir: &Path) -> Result<CommitInfo> {
        Ok(monoship_git::latest_commit(repo_dir)?)
    }

    fn commit_changed_files(&self, repo_dir: &Path, sha: &str) -> Result<Vec<FileChange>> {
        let repo = Repository::open(repo_dir)?;
        Ok(repo.commit_changes_under(sha, repo_dir)?)
    }
}
