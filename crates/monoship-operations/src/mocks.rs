use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::DateTime;
use monoship_core::{PackageInfo, ReleaseTag};
use monoship_git::{CommitInfo, FileChange, FileStatus};
use monoship_project::{MonoshipConfig, Workspace};
use semver::Version;

use crate::traits::{
    CommandOutput, CommandRunner, CommandSpec, ConfirmationGate, EnvironmentProvider, FileSystem,
    GitProvider, ProjectProvider, RegistryProvider, Sleeper,
};
use crate::types::PublishSummary;
use crate::{OperationError, Result};

pub const ROOT: &str = "/ws";
pub const SCOPE: &str = "@acme/";

/// A package under `/ws/packages/<short name>`.
pub fn make_package(name: &str, version: &str, deps: &[&str]) -> PackageInfo {
    let short = name.rsplit('/').next().unwrap_or(name);
    let mut package = PackageInfo::new(
        name,
        Version::parse(version).expect("test version should be valid"),
        Path::new(ROOT).join("packages").join(short),
    );
    package.dependencies = deps.iter().map(ToString::to_string).collect();
    package
}

pub fn with_scripts(mut package: PackageInfo, scripts: &[&str]) -> PackageInfo {
    package.scripts = scripts.iter().map(ToString::to_string).collect();
    package
}

pub fn make_workspace(config: MonoshipConfig, packages: Vec<PackageInfo>) -> Workspace {
    Workspace {
        root: PathBuf::from(ROOT),
        config,
        packages,
    }
}

pub fn commit_at(sha: &str, timestamp: i64, parents: usize) -> CommitInfo {
    CommitInfo {
        sha: sha.to_string(),
        summary: format!("commit {sha}"),
        author_time: DateTime::from_timestamp(timestamp, 0).expect("valid timestamp"),
        parents: (0..parents).map(|i| format!("{sha}-parent-{i}")).collect(),
    }
}

pub fn modified(paths: &[&str]) -> Vec<FileChange> {
    paths
        .iter()
        .map(|p| FileChange::new(PathBuf::from(p), FileStatus::Modified))
        .collect()
}

pub struct MockProjectProvider {
    workspace: Workspace,
}

impl MockProjectProvider {
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }
}

impl ProjectProvider for MockProjectProvider {
    fn discover_workspace(&self, _start_path: &Path) -> Result<Workspace> {
        Ok(self.workspace.clone())
    }

    fn load_config(&self, _start_path: &Path) -> Result<(PathBuf, MonoshipConfig)> {
        Ok((self.workspace.root.clone(), self.workspace.config.clone()))
    }
}

#[derive(Default)]
pub struct MockGitProvider {
    repos: HashMap<PathBuf, (CommitInfo, Vec<FileChange>)>,
}

impl MockGitProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repo(
        mut self,
        dir: impl Into<PathBuf>,
        commit: CommitInfo,
        files: Vec<FileChange>,
    ) -> Self {
        self.repos.insert(dir.into(), (commit, files));
        self
    }
}

impl GitProvider for MockGitProvider {
    fn latest_commit(&self, repo_dir: &Path) -> Result<CommitInfo> {
        self.repos
            .get(repo_dir)
            .map(|(commit, _)| commit.clone())
            .ok_or_else(|| {
                monoship_git::GitError::NotARepository {
                    path: repo_dir.to_path_buf(),
                }
                .into()
            })
    }

    fn commit_changed_files(&self, repo_dir: &Path, sha: &str) -> Result<Vec<FileChange>> {
        match self.repos.get(repo_dir) {
            Some((commit, files)) if commit.sha == sha => Ok(files.clone()),
            _ => Err(monoship_git::GitError::RefNotFound {
                refspec: sha.to_string(),
            }
            .into()),
        }
    }
}

/// Records every command; answers with canned stdout or a failure when the
/// rendered command starts with a registered prefix.
#[derive(Default)]
pub struct MockCommandRunner {
    calls: Mutex<Vec<CommandSpec>>,
    responses: Vec<(String, String)>,
    failures: Vec<(String, Option<PathBuf>, String)>,
}

impl MockCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stdout(mut self, prefix: &str, stdout: &str) -> Self {
        self.responses.push((prefix.to_string(), stdout.to_string()));
        self
    }

    pub fn with_failure(mut self, prefix: &str) -> Self {
        self.failures.push((prefix.to_string(), None, "mock failure".to_string()));
        self
    }

    pub fn with_failure_output(mut self, prefix: &str, output: &str) -> Self {
        self.failures.push((prefix.to_string(), None, output.to_string()));
        self
    }

    pub fn with_failure_in(mut self, prefix: &str, cwd: impl Into<PathBuf>) -> Self {
        self.failures
            .push((prefix.to_string(), Some(cwd.into()), "mock failure".to_string()));
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    pub fn rendered(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for MockCommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        self.calls.lock().expect("lock poisoned").push(spec.clone());
        let rendered = spec.to_string();

        let failure = self.failures.iter().find(|(prefix, cwd, _)| {
            rendered.starts_with(prefix) && cwd.as_ref().is_none_or(|c| c == &spec.cwd)
        });
        if let Some((_, _, output)) = failure {
            return Err(OperationError::CommandFailed {
                command: rendered,
                cwd: spec.cwd.clone(),
                status: "exit status: 1".to_string(),
                output: output.clone(),
            });
        }

        let stdout = self
            .responses
            .iter()
            .find(|(prefix, _)| rendered.starts_with(prefix))
            .map(|(_, stdout)| stdout.clone())
            .unwrap_or_default();
        Ok(CommandOutput::from_stdout(stdout))
    }
}

/// Holds every command for `hold` and records the highest number of
/// commands that were running at once.
#[derive(Default)]
pub struct InFlightRunner {
    hold: Duration,
    running: AtomicUsize,
    peak: AtomicUsize,
}

impl InFlightRunner {
    pub fn holding(hold: Duration) -> Self {
        Self {
            hold,
            ..Self::default()
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl CommandRunner for InFlightRunner {
    fn run(&self, _spec: &CommandSpec) -> Result<CommandOutput> {
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(self.hold);
        self.running.fetch_sub(1, Ordering::SeqCst);
        Ok(CommandOutput::default())
    }
}

#[derive(Default)]
pub struct MockRegistry {
    versions: HashMap<(String, ReleaseTag), Version>,
    queries: Mutex<Vec<String>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, package: &str, tag: ReleaseTag, version: &str) -> Self {
        self.versions.insert(
            (package.to_string(), tag),
            Version::parse(version).expect("test version should be valid"),
        );
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().expect("lock poisoned").clone()
    }
}

impl RegistryProvider for MockRegistry {
    fn latest_tag_version(&self, package: &str, tag: ReleaseTag) -> Result<Option<Version>> {
        self.queries
            .lock()
            .expect("lock poisoned")
            .push(format!("{package}@{tag}"));
        Ok(self.versions.get(&(package.to_string(), tag)).cloned())
    }
}

pub struct MockGate {
    answer: bool,
    seen: Mutex<Vec<PublishSummary>>,
}

impl MockGate {
    pub fn approving() -> Self {
        Self {
            answer: true,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn declining() -> Self {
        Self {
            answer: false,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<PublishSummary> {
        self.seen.lock().expect("lock poisoned").clone()
    }
}

impl ConfirmationGate for MockGate {
    fn confirm(&self, summary: &PublishSummary) -> Result<bool> {
        self.seen
            .lock()
            .expect("lock poisoned")
            .push(summary.clone());
        Ok(self.answer)
    }
}

#[derive(Default)]
pub struct MockSleeper {
    slept: Mutex<Vec<Duration>>,
}

impl MockSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().expect("lock poisoned").clone()
    }
}

impl Sleeper for MockSleeper {
    fn sleep(&self, duration: Duration) {
        self.slept.lock().expect("lock poisoned").push(duration);
    }
}

#[derive(Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

#[derive(Default)]
pub struct MockFileSystem {
    dirs: Mutex<HashSet<PathBuf>>,
    removed: Mutex<Vec<PathBuf>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(self, dir: impl Into<PathBuf>) -> Self {
        self.dirs.lock().expect("lock poisoned").insert(dir.into());
        self
    }

    pub fn removed(&self) -> Vec<PathBuf> {
        self.removed.lock().expect("lock poisoned").clone()
    }
}

impl FileSystem for MockFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().expect("lock poisoned").contains(path)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        self.removed
            .lock()
            .expect("lock poisoned")
            .push(path.to_path_buf());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.dirs
            .lock()
            .expect("lock poisoned")
            .insert(path.to_path_buf());
        Ok(())
    }
}
