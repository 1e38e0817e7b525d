use std::path::Path;

use crate::Result;

pub trait FileSystem: Send + Sync {
    fn is_dir(&self, path: &Path) -> bool;

    /// Removes `path` recursively; a missing path is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing directory cannot be removed.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<()>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        (**self).remove_dir_all(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        (**self).create_dir_all(path)
    }
}
