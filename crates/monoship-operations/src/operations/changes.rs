use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use monoship_git::CommitInfo;
use monoship_project::RepoConfig;
use tracing::{debug, info};

use crate::Result;
use crate::traits::GitProvider;

/// The latest commit of one repository and the files it touched.
#[derive(Debug, Clone)]
pub struct RepoChanges {
    pub name: String,
    /// Checkout directory relative to the workspace root; empty for the root.
    pub dir: PathBuf,
    pub commit: CommitInfo,
    /// Workspace-root-relative paths; absolute for files outside the
    /// repository directory.
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    pub repos: Vec<RepoChanges>,
    /// Every changed file once, workspace-root-relative, in repository order.
    pub files: Vec<PathBuf>,
}

impl ChangeSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

pub struct ChangeCollector<G> {
    git_provider: G,
}

impl<G> ChangeCollector<G>
where
    G: GitProvider,
{
    pub fn new(git_provider: G) -> Self {
        Self { git_provider }
    }

    /// Reads the latest commit of each repository and keeps the newest one,
    /// or all of them with `all_repos`.
    ///
    /// With no configured repositories the workspace root is the repository.
    ///
    /// # Errors
    ///
    /// Returns an error if a repository cannot be opened or diffed.
    pub fn collect(
        &self,
        workspace_root: &Path,
        repos: &[RepoConfig],
        all_repos: bool,
    ) -> Result<ChangeSet> {
        let targets: Vec<(String, PathBuf)> = if repos.is_empty() {
            vec![(".".to_string(), PathBuf::new())]
        } else {
            repos.iter().map(|r| (r.name.clone(), r.dir.clone())).collect()
        };

        let mut latest = Vec::with_capacity(targets.len());
        for (name, dir) in targets {
            let commit = self.git_provider.latest_commit(&repo_root(workspace_root, &dir))?;
            debug!(
                repo = %name,
                sha = %commit.sha,
                author_time = %commit.author_time,
                merge = commit.is_merge(),
                root = commit.is_root(),
                "latest commit"
            );
            latest.push((name, dir, commit));
        }

        let selected = if all_repos {
            latest
        } else {
            newest(latest).into_iter().collect()
        };

        let mut repos_out = Vec::with_capacity(selected.len());
        let mut files: IndexSet<PathBuf> = IndexSet::new();

        for (name, dir, commit) in selected {
            let repo_files = self.changed_paths(workspace_root, &dir, &commit)?;
            info!(repo = %name, sha = %commit.sha, files = repo_files.len(), "collected changes");
            files.extend(repo_files.iter().cloned());
            repos_out.push(RepoChanges {
                name,
                dir,
                commit,
                files: repo_files,
            });
        }

        Ok(ChangeSet {
            repos: repos_out,
            files: files.into_iter().collect(),
        })
    }

    fn changed_paths(
        &self,
        workspace_root: &Path,
        dir: &Path,
        commit: &CommitInfo,
    ) -> Result<Vec<PathBuf>> {
        let changes = self
            .git_provider
            .commit_changed_files(&repo_root(workspace_root, dir), &commit.sha)?;

        let mut paths: IndexSet<PathBuf> = IndexSet::new();
        for change in changes {
            // A rename touches the package it left as well as the one it entered.
            // Joining keeps paths outside `dir` absolute.
            if let Some(old_path) = change.old_path {
                paths.insert(dir.join(old_path));
            }
            paths.insert(dir.join(change.path));
        }
        Ok(paths.into_iter().collect())
    }
}

fn repo_root(workspace_root: &Path, dir: &Path) -> PathBuf {
    if dir.as_os_str().is_empty() {
        workspace_root.to_path_buf()
    } else {
        workspace_root.join(dir)
    }
}

/// Newest by author time; the first configured repository wins a tie.
fn newest(
    commits: Vec<(String, PathBuf, CommitInfo)>,
) -> Option<(String, PathBuf, CommitInfo)> {
    commits.into_iter().reduce(|best, candidate| {
        if candidate.2.author_time > best.2.author_time {
            candidate
        } else {
            best
        }
    })
}
