use std::path::{Path, PathBuf};

use monoship_project::{MonoshipConfig, Workspace};

use crate::Result;

pub trait ProjectProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if no workspace can be found from the given path or
    /// any of its manifests fails to load.
    fn discover_workspace(&self, start_path: &Path) -> Result<Workspace>;

    /// # Errors
    ///
    /// Returns an error if no workspace can be found or its configuration is
    /// invalid.
    fn load_config(&self, start_path: &Path) -> Result<(PathBuf, MonoshipConfig)>;
}

impl<T: ProjectProvider + ?Sized> ProjectProvider for &T {
    fn discover_workspace(&self, start_path: &Path) -> Result<Workspace> {
        (**self).discover_workspace(start_path)
    }

    fn load_config(&self, start_path: &Path) -> Result<(PathBuf, MonoshipConfig)> {
        (**self).load_config(start_path)
    }
}
