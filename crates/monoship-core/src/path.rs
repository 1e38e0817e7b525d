use std::path::PathBuf;

/// Source of the directory that workspace-root discovery starts from.
pub trait StartPathProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the directory cannot be determined.
    fn start_path(&self) -> std::io::Result<PathBuf>;
}

#[derive(Debug, Default, Clone)]
pub struct CurrentDirProvider;

impl StartPathProvider for CurrentDirProvider {
    fn start_path(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }
}

/// A start path given on the command line. Relative paths resolve against
/// the current directory.
#[derive(Debug, Clone)]
pub struct FixedPathProvider(PathBuf);

impl FixedPathProvider {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

impl StartPathProvider for FixedPathProvider {
    fn start_path(&self) -> std::io::Result<PathBuf> {
        if self.0.is_absolute() {
            Ok(self.0.clone())
        } else {
            Ok(std::env::current_dir()?.join(&self.0))
        }
    }
}
