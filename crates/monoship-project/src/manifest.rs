use std::path::Path;

use indexmap::IndexMap;
use monoship_core::PackageInfo;
use serde::Deserialize;

use crate::error::ProjectError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PackageJson {
    pub(crate) name: Option<String>,
    pub(crate) version: Option<String>,
    #[serde(default)]
    pub(crate) dependencies: IndexMap<String, serde_json::Value>,
    #[serde(default)]
    pub(crate) dev_dependencies: IndexMap<String, serde_json::Value>,
    #[serde(default)]
    pub(crate) scripts: IndexMap<String, serde_json::Value>,
    #[serde(default)]
    pub(crate) private: bool,
}

/// Reads a `package.json` and turns it into a [`PackageInfo`] rooted at the
/// manifest's directory.
///
/// # Errors
///
/// Returns `ProjectError` if the file cannot be read, is not valid JSON, lacks a
/// `name` or `version`, or carries a version that is not valid semver.
pub fn read_package_manifest(manifest_path: &Path) -> Result<PackageInfo, ProjectError> {
    let content =
        std::fs::read_to_string(manifest_path).map_err(|source| ProjectError::ManifestRead {
            path: manifest_path.to_path_buf(),
            source,
        })?;

    let manifest: PackageJson =
        serde_json::from_str(&content).map_err(|source| ProjectError::ManifestParse {
            path: manifest_path.to_path_buf(),
            source,
        })?;

    into_package_info(manifest, manifest_path)
}

fn into_package_info(
    manifest: PackageJson,
    manifest_path: &Path,
) -> Result<PackageInfo, ProjectError> {
    let name = manifest.name.ok_or_else(|| ProjectError::MissingField {
        path: manifest_path.to_path_buf(),
        field: "name",
    })?;
    let version_str = manifest.version.ok_or_else(|| ProjectError::MissingField {
        path: manifest_path.to_path_buf(),
        field: "version",
    })?;
    let version = version_str
        .parse()
        .map_err(|source| ProjectError::InvalidVersion {
            path: manifest_path.to_path_buf(),
            version: version_str.clone(),
            source,
        })?;

    // A manifest path always has a parent; the fallback keeps this total.
    let dir = manifest_path.parent().unwrap_or(manifest_path);

    Ok(PackageInfo {
        name,
        version,
        path: dir.to_path_buf(),
        manifest_path: manifest_path.to_path_buf(),
        dependencies: manifest.dependencies.into_keys().collect(),
        dev_dependencies: manifest.dev_dependencies.into_keys().collect(),
        scripts: manifest.scripts.into_keys().collect(),
        private: manifest.private,
    })
}
