use std::path::{Path, PathBuf};

use crate::{FileChange, FileStatus, GitError, Result};

use super::Repository;

impl Repository {
    /// Files a single commit changed relative to its first parent.
    ///
    /// For a merge commit this is everything the merge brought into the first
    /// parent's line; a root commit is compared with the empty tree.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RefNotFound`] if `refspec` does not resolve to a commit.
    pub fn commit_changed_files(&self, refspec: &str) -> Result<Vec<FileChange>> {
        let commit = self
            .inner
            .revparse_single(refspec)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|_| GitError::RefNotFound {
                refspec: refspec.to_string(),
            })?;

        let base_tree = match commit.parent(0) {
            Ok(parent) => Some(parent.tree()?),
            Err(_) => None,
        };

        self.diff_trees(base_tree.as_ref(), &commit.tree()?)
    }

    /// Like [`Repository::commit_changed_files`], with paths relative to
    /// `dir`, a directory inside the working tree. Files outside `dir` are
    /// reported with absolute paths.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RefNotFound`] if `refspec` does not resolve to a commit.
    pub fn commit_changes_under(&self, refspec: &str, dir: &Path) -> Result<Vec<FileChange>> {
        let changes = self.commit_changed_files(refspec)?;

        Ok(changes
            .into_iter()
            .map(|change| FileChange {
                path: self.rebase_onto(&change.path, dir),
                old_path: change.old_path.map(|old| self.rebase_onto(&old, dir)),
                status: change.status,
            })
            .collect())
    }

    fn diff_trees(
        &self,
        base: Option<&git2::Tree<'_>>,
        head: &git2::Tree<'_>,
    ) -> Result<Vec<FileChange>> {
        let mut diff = self.inner.diff_tree_to_tree(base, Some(head), None)?;

        let mut find_opts = git2::DiffFindOptions::new();
        find_opts.renames(true);
        diff.find_similar(Some(&mut find_opts))?;

        let mut changes = Vec::new();

        for delta in diff.deltas() {
            let status = match delta.status() {
                git2::Delta::Added => FileStatus::Added,
                git2::Delta::Deleted => FileStatus::Deleted,
                git2::Delta::Modified => FileStatus::Modified,
                git2::Delta::Renamed => FileStatus::Renamed,
                git2::Delta::Copied => FileStatus::Copied,
                _ => continue,
            };

            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .map(PathBuf::from)
                .ok_or(GitError::MissingDeltaPath)?;

            let mut change = FileChange::new(path, status);

            if matches!(status, FileStatus::Renamed | FileStatus::Copied) {
                if let Some(old_path) = delta.old_file().path() {
                    change = change.with_old_path(old_path.to_path_buf());
                }
            }

            changes.push(change);
        }

        Ok(changes)
    }
}
