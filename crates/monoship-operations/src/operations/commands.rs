//! Package-manager and git invocations, rendered as [`CommandSpec`]s.

use std::path::Path;

use monoship_core::{PackageManager, ReleaseTag};
use semver::Version;

use crate::traits::CommandSpec;

pub(crate) fn install(pm: PackageManager, dir: &Path) -> CommandSpec {
    CommandSpec::new(pm.program(), dir).arg("install")
}

pub(crate) fn run_script(pm: PackageManager, dir: &Path, script: &str) -> CommandSpec {
    CommandSpec::new(pm.program(), dir).args(["run", script])
}

/// Steps that set `version` in the manifest and publish under `tag`.
pub(crate) fn publish(
    pm: PackageManager,
    dir: &Path,
    version: &Version,
    tag: ReleaseTag,
) -> Vec<CommandSpec> {
    let version = version.to_string();
    match pm {
        PackageManager::Npm => vec![
            CommandSpec::new("npm", dir).args([
                "version",
                version.as_str(),
                "--no-git-tag-version",
                "--allow-same-version",
            ]),
            CommandSpec::new("npm", dir).args(["publish", "--tag", tag.as_str()]),
        ],
        PackageManager::Yarn => vec![CommandSpec::new("yarn", dir).args([
            "publish",
            "--new-version",
            version.as_str(),
            "--tag",
            tag.as_str(),
            "--no-git-tag-version",
        ])],
    }
}

pub(crate) fn clone(url: &str, branch: Option<&str>, dest: &Path, cwd: &Path) -> CommandSpec {
    let mut spec = CommandSpec::new("git", cwd).arg("clone");
    if let Some(branch) = branch {
        spec = spec.args(["--branch", branch]);
    }
    spec.arg(url).arg(dest.to_string_lossy())
}
