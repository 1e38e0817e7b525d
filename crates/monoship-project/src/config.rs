use std::collections::HashSet;
use std::path::{Path, PathBuf};

use monoship_core::PackageManager;
use serde::Deserialize;

use crate::error::ProjectError;

const DEFAULT_VERSION_ENV: &str = "MONOSHIP_RELEASE_VERSION";
const DEFAULT_DELAY_LATEST_SECS: u64 = 10;
const DEFAULT_DELAY_ALPHA_SECS: u64 = 5;

/// How the publish confirmation gate is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateMode {
    /// Prompt on an interactive terminal, otherwise delay.
    #[default]
    Auto,
    Delay,
    Prompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayConfig {
    latest_secs: u64,
    alpha_secs: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            latest_secs: DEFAULT_DELAY_LATEST_SECS,
            alpha_secs: DEFAULT_DELAY_ALPHA_SECS,
        }
    }
}

impl DelayConfig {
    #[must_use]
    pub fn new(latest_secs: u64, alpha_secs: u64) -> Self {
        Self {
            latest_secs,
            alpha_secs,
        }
    }

    #[must_use]
    pub fn latest_secs(&self) -> u64 {
        self.latest_secs
    }

    #[must_use]
    pub fn alpha_secs(&self) -> u64 {
        self.alpha_secs
    }
}

/// Packages released together under one computed alpha/release version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    packages: Vec<String>,
    registry_probes: Vec<String>,
    version_env: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            packages: Vec::new(),
            registry_probes: Vec::new(),
            version_env: DEFAULT_VERSION_ENV.to_string(),
        }
    }
}

impl CoreConfig {
    #[must_use]
    pub fn new(packages: Vec<String>, registry_probes: Vec<String>) -> Self {
        Self {
            packages,
            registry_probes,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.packages.iter().any(|p| p == name)
    }

    #[must_use]
    pub fn registry_probes(&self) -> &[String] {
        &self.registry_probes
    }

    #[must_use]
    pub fn version_env(&self) -> &str {
        &self.version_env
    }
}

/// A sibling repository checked out under the workspace root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoConfig {
    pub name: String,
    pub url: String,
    /// Checkout directory relative to the workspace root.
    pub dir: PathBuf,
    pub branch: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MonoshipConfig {
    scope: String,
    package_manager: PackageManager,
    packages: Vec<String>,
    exclude: Vec<String>,
    skip_leading_batches: usize,
    publish_concurrency: usize,
    gate: GateMode,
    delays: DelayConfig,
    core: CoreConfig,
    repos: Vec<RepoConfig>,
}

impl MonoshipConfig {
    #[must_use]
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            package_manager: PackageManager::default(),
            packages: Vec::new(),
            exclude: Vec::new(),
            skip_leading_batches: 0,
            publish_concurrency: 1,
            gate: GateMode::default(),
            delays: DelayConfig::default(),
            core: CoreConfig::default(),
            repos: Vec::new(),
        }
    }

    /// Namespace prefix that marks a dependency as in-workspace.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    #[must_use]
    pub fn package_manager(&self) -> PackageManager {
        self.package_manager
    }

    #[must_use]
    pub fn package_patterns(&self) -> &[String] {
        &self.packages
    }

    #[must_use]
    pub fn exclude_patterns(&self) -> &[String] {
        &self.exclude
    }

    #[must_use]
    pub fn skip_leading_batches(&self) -> usize {
        self.skip_leading_batches
    }

    #[must_use]
    pub fn publish_concurrency(&self) -> usize {
        self.publish_concurrency
    }

    #[must_use]
    pub fn gate(&self) -> GateMode {
        self.gate
    }

    #[must_use]
    pub fn delays(&self) -> DelayConfig {
        self.delays
    }

    #[must_use]
    pub fn core(&self) -> &CoreConfig {
        &self.core
    }

    #[must_use]
    pub fn repos(&self) -> &[RepoConfig] {
        &self.repos
    }

    #[must_use]
    pub fn with_package_manager(mut self, package_manager: PackageManager) -> Self {
        self.package_manager = package_manager;
        self
    }

    #[must_use]
    pub fn with_core(mut self, core: CoreConfig) -> Self {
        self.core = core;
        self
    }

    #[must_use]
    pub fn with_repos(mut self, repos: Vec<RepoConfig>) -> Self {
        self.repos = repos;
        self
    }

    #[must_use]
    pub fn with_skip_leading_batches(mut self, skip: usize) -> Self {
        self.skip_leading_batches = skip;
        self
    }

    #[must_use]
    pub fn with_publish_concurrency(mut self, concurrency: usize) -> Self {
        self.publish_concurrency = concurrency;
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    scope: String,
    #[serde(default)]
    package_manager: PackageManager,
    #[serde(default)]
    packages: Vec<String>,
    #[serde(default)]
    exclude: Vec<String>,
    skip_leading_batches: Option<usize>,
    publish_concurrency: Option<usize>,
    #[serde(default)]
    gate: GateMode,
    delay_latest_secs: Option<u64>,
    delay_alpha_secs: Option<u64>,
    core: Option<CoreSection>,
    #[serde(default)]
    repos: Vec<RepoSection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CoreSection {
    #[serde(default)]
    packages: Vec<String>,
    #[serde(default)]
    registry_probes: Vec<String>,
    version_env: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RepoSection {
    name: String,
    url: String,
    dir: Option<PathBuf>,
    branch: Option<String>,
}

/// Parses `monoship.toml` content. `path` is only used for error reporting.
///
/// # Errors
///
/// Returns `ProjectError::ConfigParse` for malformed TOML or unknown keys and
/// `ProjectError::InvalidConfig` for values that parse but cannot be used.
pub fn parse_config(content: &str, path: &Path) -> Result<MonoshipConfig, ProjectError> {
    let file: ConfigFile = toml::from_str(content).map_err(|source| ProjectError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;

    let invalid = |reason: &str| ProjectError::InvalidConfig {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    if file.scope.trim().is_empty() {
        return Err(invalid("'scope' must not be empty"));
    }

    let publish_concurrency = file.publish_concurrency.unwrap_or(1);
    if publish_concurrency == 0 {
        return Err(invalid("'publish_concurrency' must be at least 1"));
    }

    let mut seen = HashSet::new();
    let mut repos = Vec::with_capacity(file.repos.len());
    for repo in file.repos {
        if !seen.insert(repo.name.clone()) {
            return Err(ProjectError::InvalidConfig {
                path: path.to_path_buf(),
                reason: format!("repository '{}' is declared twice", repo.name),
            });
        }
        repos.push(RepoConfig {
            dir: repo.dir.unwrap_or_else(|| PathBuf::from(&repo.name)),
            name: repo.name,
            url: repo.url,
            branch: repo.branch,
        });
    }

    let defaults = DelayConfig::default();
    let delays = DelayConfig {
        latest_secs: file.delay_latest_secs.unwrap_or(defaults.latest_secs),
        alpha_secs: file.delay_alpha_secs.unwrap_or(defaults.alpha_secs),
    };

    let core = file.core.map_or_else(CoreConfig::default, |core| CoreConfig {
        packages: core.packages,
        registry_probes: core.registry_probes,
        version_env: core
            .version_env
            .unwrap_or_else(|| DEFAULT_VERSION_ENV.to_string()),
    });

    Ok(MonoshipConfig {
        scope: file.scope,
        package_manager: file.package_manager,
        packages: file.packages,
        exclude: file.exclude,
        skip_leading_batches: file.skip_leading_batches.unwrap_or(0),
        publish_concurrency,
        gate: file.gate,
        delays,
        core,
        repos,
    })
}

/// # Errors
///
/// Returns an error if the file cannot be read or fails [`parse_config`].
pub(crate) fn load_config(path: &Path) -> Result<MonoshipConfig, ProjectError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProjectError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content, path)
}
