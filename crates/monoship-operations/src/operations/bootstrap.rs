use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use monoship_graph::{PackageGraph, ensure_acyclic, plan_batches};
use tracing::info;

use super::commands;
use crate::traits::{CommandRunner, FileSystem, ProjectProvider};
use crate::{OperationError, Result};

const NODE_MODULES: &str = "node_modules";
const BUILD_SCRIPT: &str = "build";

#[derive(Debug, Clone, Copy, Default)]
pub struct BootstrapInput {
    /// Remove `node_modules` before installing.
    pub clean: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapOutput {
    pub root: PathBuf,
    pub cloned: Vec<String>,
    pub already_present: Vec<String>,
    /// Packages in dependency order.
    pub installed: Vec<String>,
    pub built: Vec<String>,
}

/// Clones missing repositories, then installs and builds every package of
/// the workspace, dependencies before dependents.
pub struct BootstrapOperation<P, R, F> {
    project_provider: P,
    runner: R,
    fs: F,
}

impl<P, R, F> BootstrapOperation<P, R, F>
where
    P: ProjectProvider,
    R: CommandRunner,
    F: FileSystem,
{
    pub fn new(project_provider: P, runner: R, fs: F) -> Self {
        Self {
            project_provider,
            runner,
            fs,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded, the packages
    /// form a cycle, or any clone, install or build command fails. Nothing is
    /// rolled back.
    pub fn execute(&self, start_path: &Path, input: &BootstrapInput) -> Result<BootstrapOutput> {
        let (root, config) = self.project_provider.load_config(start_path)?;
        let mut output = BootstrapOutput {
            root: root.clone(),
            ..BootstrapOutput::default()
        };

        for repo in config.repos() {
            let dir = root.join(&repo.dir);

            if self.fs.is_dir(&dir) {
                info!(repo = %repo.name, dir = %dir.display(), "already checked out");
                output.already_present.push(repo.name.clone());
                continue;
            }

            if let Some(parent) = dir.parent() {
                self.fs.create_dir_all(parent)?;
            }
            info!(repo = %repo.name, url = %repo.url, "cloning");
            self.runner.run(&commands::clone(
                &repo.url,
                repo.branch.as_deref(),
                &repo.dir,
                &root,
            ))?;
            output.cloned.push(repo.name.clone());
        }

        // Packages only exist once every repository is on disk.
        let workspace = self.project_provider.discover_workspace(&root)?;
        let pm = workspace.config.package_manager();
        let graph = PackageGraph::build(&workspace.packages, workspace.config.scope());
        ensure_acyclic(&graph)?;
        let everything: IndexSet<String> = graph.iter().map(|r| r.name.clone()).collect();
        let batches = plan_batches(&graph, &everything)?;

        for name in batches.iter().flatten() {
            let package = workspace
                .package(name)
                .ok_or_else(|| OperationError::UnknownPackage(name.clone()))?;
            let dir = package.dir();

            if input.clean {
                info!(package = %name, "removing node_modules");
                self.fs.remove_dir_all(&dir.join(NODE_MODULES))?;
            }

            info!(package = %name, %pm, "installing dependencies");
            self.runner.run(&commands::install(pm, dir))?;
            output.installed.push(name.clone());

            if package.has_script(BUILD_SCRIPT) {
                info!(package = %name, "building");
                self.runner
                    .run(&commands::run_script(pm, dir, BUILD_SCRIPT))?;
                output.built.push(name.clone());
            }
        }

        Ok(output)
    }
}
