use std::path::PathBuf;

use monoship_core::ReleaseTag;
use semver::Version;
use tracing::debug;

use crate::traits::{CommandRunner, CommandSpec, RegistryProvider};
use crate::{OperationError, Result};

const NOT_FOUND_CODE: &str = "E404";

/// Queries dist-tags through `npm view`.
pub struct NpmRegistry<R> {
    runner: R,
    cwd: PathBuf,
}

impl<R> NpmRegistry<R>
where
    R: CommandRunner,
{
    /// `cwd` decides which `.npmrc` (and so which registry) applies.
    pub fn new(runner: R, cwd: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            cwd: cwd.into(),
        }
    }
}

impl<R> RegistryProvider for NpmRegistry<R>
where
    R: CommandRunner,
{
    fn latest_tag_version(&self, package: &str, tag: ReleaseTag) -> Result<Option<Version>> {
        let spec = CommandSpec::new("npm", &self.cwd)
            .arg("view")
            .arg(format!("{package}@{tag}"))
            .arg("version");

        let output = match self.runner.run(&spec) {
            Ok(output) => output,
            Err(OperationError::CommandFailed { output, .. })
                if output.contains(NOT_FOUND_CODE) =>
            {
                debug!(package, %tag, "package not in registry");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        let value = output.stdout.trim();
        debug!(package, %tag, version = value, "registry dist-tag");

        if value.is_empty() {
            return Ok(None);
        }

        Version::parse(value)
            .map(Some)
            .map_err(|source| OperationError::RegistryVersion {
                package: package.to_string(),
                tag: tag.to_string(),
                value: value.to_string(),
                source,
            })
    }
}
