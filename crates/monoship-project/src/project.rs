use std::collections::HashMap;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use monoship_core::PackageInfo;
use tracing::debug;

use crate::config::{MonoshipConfig, load_config};
use crate::error::ProjectError;
use crate::manifest::read_package_manifest;
use crate::{CONFIG_FILE_NAME, MANIFEST_FILE_NAME};

const SKIPPED_DIRS: &[&str] = &["node_modules"];

#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub config: MonoshipConfig,
    pub packages: Vec<PackageInfo>,
}

impl Workspace {
    #[must_use]
    pub fn package(&self, name: &str) -> Option<&PackageInfo> {
        self.packages.iter().find(|p| p.name == name)
    }
}

/// Walks up from `start_dir` to the first directory holding `monoship.toml`.
///
/// # Errors
///
/// Returns `ProjectError::NotFound` when no ancestor has a configuration file.
pub fn find_workspace_root(start_dir: &Path) -> Result<PathBuf, ProjectError> {
    let start_dir = start_dir
        .canonicalize()
        .map_err(|_| ProjectError::NotFound {
            start_dir: start_dir.to_path_buf(),
        })?;

    let mut current = start_dir.as_path();
    loop {
        if current.join(CONFIG_FILE_NAME).is_file() {
            return Ok(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return Err(ProjectError::NotFound { start_dir }),
        }
    }
}

/// Locates the workspace, loads its configuration and every package manifest.
///
/// Manifest loading is all-or-nothing: one bad `package.json` fails the load.
///
/// # Errors
///
/// Returns `ProjectError` if the root cannot be found, the configuration is
/// invalid, or any manifest fails to load.
pub fn discover_workspace(start_dir: &Path) -> Result<Workspace, ProjectError> {
    let root = find_workspace_root(start_dir)?;
    let config = load_config(&root.join(CONFIG_FILE_NAME))?;
    let packages = discover_packages(&root, &config)?;

    debug!(root = %root.display(), packages = packages.len(), "discovered workspace");

    Ok(Workspace {
        root,
        config,
        packages,
    })
}

/// Locates the workspace and loads only its configuration.
///
/// Used before the packages exist on disk, e.g. ahead of cloning.
///
/// # Errors
///
/// Returns `ProjectError` if the root cannot be found or the configuration
/// is invalid.
pub fn load_workspace_config(start_dir: &Path) -> Result<(PathBuf, MonoshipConfig), ProjectError> {
    let root = find_workspace_root(start_dir)?;
    let config = load_config(&root.join(CONFIG_FILE_NAME))?;
    Ok((root, config))
}

/// Expands the configured package globs below `root` and reads every
/// `package.json` found in a matching directory.
///
/// # Errors
///
/// Returns `ProjectError` for invalid glob patterns, unreadable directories,
/// bad manifests, or two manifests declaring the same package name.
pub fn discover_packages(
    root: &Path,
    config: &MonoshipConfig,
) -> Result<Vec<PackageInfo>, ProjectError> {
    let excludes = config
        .exclude_patterns()
        .iter()
        .map(|pattern| compile_glob(pattern))
        .collect::<Result<Vec<_>, _>>()?;

    let mut packages: Vec<PackageInfo> = Vec::new();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    for pattern in config.package_patterns() {
        let glob = compile_glob(pattern)?;
        let mut dirs = Vec::new();
        collect_matching_dirs(root, root, &glob, &excludes, &mut dirs)?;

        for dir in dirs {
            let manifest_path = dir.join(MANIFEST_FILE_NAME);
            if !manifest_path.is_file() {
                continue;
            }
            // The same directory may match more than one pattern.
            if packages.iter().any(|p| p.manifest_path == manifest_path) {
                continue;
            }

            let package = read_package_manifest(&manifest_path)?;
            if let Some(first) = seen.get(&package.name) {
                return Err(ProjectError::DuplicatePackage {
                    name: package.name,
                    first: first.clone(),
                    second: manifest_path,
                });
            }
            seen.insert(package.name.clone(), manifest_path);
            packages.push(package);
        }
    }

    Ok(packages)
}

fn compile_glob(pattern: &str) -> Result<GlobMatcher, ProjectError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| ProjectError::GlobPattern {
            pattern: pattern.to_string(),
            source,
        })
}

fn collect_matching_dirs(
    base: &Path,
    current: &Path,
    glob: &GlobMatcher,
    excludes: &[GlobMatcher],
    results: &mut Vec<PathBuf>,
) -> Result<(), ProjectError> {
    let mut entries = std::fs::read_dir(current)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();

    for path in entries {
        if !path.is_dir() || is_skipped(&path) {
            continue;
        }

        // Fallback to full path if strip_prefix fails (shouldn't happen in practice)
        let relative = path.strip_prefix(base).unwrap_or(&path);

        if excludes.iter().any(|ex| ex.is_match(relative)) {
            continue;
        }

        if glob.is_match(relative) {
            results.push(path.clone());
        }

        collect_matching_dirs(base, &path, glob, excludes, results)?;
    }

    Ok(())
}

fn is_skipped(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.') || SKIPPED_DIRS.contains(&name))
}
