mod commit;
mod diff;

use std::path::{Path, PathBuf};

use crate::{GitError, Result};

pub struct Repository {
    pub(crate) inner: git2::Repository,
    root: PathBuf,
}

impl Repository {
    /// # Errors
    ///
    /// Returns [`GitError::NotARepository`] if the path is not inside a git repository.
    pub fn open(path: &Path) -> Result<Self> {
        let inner = git2::Repository::discover(path).map_err(|_| GitError::NotARepository {
            path: path.to_path_buf(),
        })?;

        let root = inner.workdir().ok_or_else(|| GitError::NotARepository {
            path: path.to_path_buf(),
        })?;

        // Use dunce to get a path without the \\?\ prefix on Windows
        let root =
            dunce::canonicalize(root).unwrap_or_else(|_| dunce::simplified(root).to_path_buf());

        Ok(Self { inner, root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Turns a path relative to the working tree root into one relative to
    /// `dir`. Paths outside `dir` come back absolute.
    pub(crate) fn rebase_onto(&self, path: &Path, dir: &Path) -> PathBuf {
        let absolute = self.root.join(path);
        let base =
            dunce::canonicalize(dir).unwrap_or_else(|_| dunce::simplified(dir).to_path_buf());

        absolute
            .strip_prefix(&base)
            .map_or_else(|_| absolute.clone(), Path::to_path_buf)
    }
}
