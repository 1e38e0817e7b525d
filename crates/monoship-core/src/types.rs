use std::fmt;
use std::path::{Path, PathBuf};

use semver::Version;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
}

impl PackageManager {
    #[must_use]
    pub fn program(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// Registry dist-tag a package is published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseTag {
    Latest,
    Alpha,
}

impl ReleaseTag {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Alpha => "alpha",
        }
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Test,
    Publish,
}

/// A package discovered from its `package.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub version: Version,
    /// Package directory (absolute).
    pub path: PathBuf,
    pub manifest_path: PathBuf,
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
    pub scripts: Vec<String>,
    pub private: bool,
}

impl PackageInfo {
    #[must_use]
    pub fn new(name: impl Into<String>, version: Version, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: name.into(),
            version,
            manifest_path: path.join("package.json"),
            path,
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
            scripts: Vec::new(),
            private: false,
        }
    }

    #[must_use]
    pub fn has_script(&self, script: &str) -> bool {
        self.scripts.iter().any(|s| s == script)
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.path
    }
}
