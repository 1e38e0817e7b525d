use std::path::PathBuf;

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: PathBuf,
    pub status: FileStatus,
    pub old_path: Option<PathBuf>,
}

impl FileChange {
    #[must_use]
    pub fn new(path: PathBuf, status: FileStatus) -> Self {
        Self {
            path,
            status,
            old_path: None,
        }
    }

    #[must_use]
    pub fn with_old_path(mut self, old_path: PathBuf) -> Self {
        self.old_path = Some(old_path);
        self
    }
}

/// Metadata of a single commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub sha: String,
    pub summary: String,
    pub author_time: DateTime<Utc>,
    pub parents: Vec<String>,
}

impl CommitInfo {
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}
