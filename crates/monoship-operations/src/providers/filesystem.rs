use std::io::ErrorKind;
use std::path::Path;

use crate::traits::FileSystem;
use crate::{OperationError, Result};

#[derive(Debug, Default, Clone, Copy)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        match std::fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(OperationError::RemoveDir {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(|source| OperationError::CreateDir {
            path: path.to_path_buf(),
            source,
        })
    }
}
