use std::path::{Path, PathBuf};

use monoship_project::{MonoshipConfig, Workspace, discover_workspace, load_workspace_config};

use crate::Result;
use crate::traits::ProjectProvider;

pub struct FileSystemProjectProvider;

impl FileSystemProjectProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemProjectProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectProvider for FileSystemProjectProvider {
    fn discover_workspace(&self, start_path: &Path) -> Result<Workspace> {
        Ok(discover_workspace(start_path)?)
    }

    fn load_config(&self, start_path: &Path) -> Result<(PathBuf, MonoshipConfig)> {
        Ok(load_workspace_config(start_path)?)
    }
}
