use chrono::{DateTime, Utc};

use crate::{CommitInfo, GitError, Result};

use super::Repository;

impl Repository {
    /// # Errors
    ///
    /// Returns [`GitError::EmptyRepository`] if HEAD does not point at a commit.
    pub fn head_commit(&self) -> Result<CommitInfo> {
        let head = self
            .inner
            .head()
            .and_then(|h| h.peel_to_commit())
            .map_err(|_| GitError::EmptyRepository {
                path: self.root().to_path_buf(),
            })?;

        commit_info(&head)
    }
}

fn commit_info(commit: &git2::Commit<'_>) -> Result<CommitInfo> {
    let sha = commit.id().to_string();
    let author_time: DateTime<Utc> = DateTime::from_timestamp(commit.author().when().seconds(), 0)
        .ok_or_else(|| GitError::InvalidCommitTime { sha: sha.clone() })?;

    Ok(CommitInfo {
        summary: commit.summary().unwrap_or_default().to_string(),
        author_time,
        parents: commit.parent_ids().map(|id| id.to_string()).collect(),
        sha,
    })
}
