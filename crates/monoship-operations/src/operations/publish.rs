use monoship_core::{PackageManager, ReleaseTag};
use monoship_graph::PublishOrder;
use monoship_project::Workspace;
use monoship_version::{bump_patch, resolve_release_version, select_tag};
use rayon::prelude::*;
use semver::Version;
use tracing::{debug, info, warn};

use super::commands;
use crate::traits::{CommandRunner, ConfirmationGate, EnvironmentProvider, RegistryProvider};
use crate::types::{PlannedPublish, PublishSummary};
use crate::{OperationError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct PublishInput {
    /// Overrides `publish_concurrency` from the configuration.
    pub concurrency: Option<usize>,
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub enum PublishOutcome {
    /// Nothing was run; the summary is what would have been published.
    DryRun(PublishSummary),
    Published(PublishSummary),
}

impl PublishOutcome {
    #[must_use]
    pub fn summary(&self) -> &PublishSummary {
        match self {
            Self::DryRun(summary) | Self::Published(summary) => summary,
        }
    }
}

pub struct PublishOperation<R, Reg, E, Gt> {
    runner: R,
    registry: Reg,
    environment: E,
    gate: Gt,
}

impl<R, Reg, E, Gt> PublishOperation<R, Reg, E, Gt>
where
    R: CommandRunner,
    Reg: RegistryProvider,
    E: EnvironmentProvider,
    Gt: ConfirmationGate,
{
    pub fn new(runner: R, registry: Reg, environment: E, gate: Gt) -> Self {
        Self {
            runner,
            registry,
            environment,
            gate,
        }
    }

    /// Computes versions and tags, passes the gate, then publishes batch by
    /// batch. A batch starts only once the previous one has fully finished.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Cancelled` when the gate declines, the first
    /// publish failure of a batch once that batch has settled, or any error
    /// from computing the release version.
    pub fn execute(
        &self,
        workspace: &Workspace,
        order: &PublishOrder,
        input: &PublishInput,
    ) -> Result<PublishOutcome> {
        let summary = self.summarize(workspace, order)?;

        if input.dry_run {
            info!(packages = summary.len(), "dry run, nothing published");
            return Ok(PublishOutcome::DryRun(summary));
        }

        if summary.is_empty() {
            info!("nothing to publish");
            return Ok(PublishOutcome::Published(summary));
        }

        if !self.gate.confirm(&summary)? {
            return Err(OperationError::Cancelled);
        }

        let concurrency = input
            .concurrency
            .unwrap_or_else(|| workspace.config.publish_concurrency())
            .max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(concurrency)
            .thread_name(|i| format!("monoship-publish-{i}"))
            .build()?;

        let pm = workspace.config.package_manager();
        let runner = &self.runner;

        for (index, batch) in summary.batches.iter().enumerate() {
            info!(batch = index, packages = batch.len(), concurrency, "publishing batch");

            let results: Vec<Result<()>> = pool.install(|| {
                batch
                    .par_iter()
                    .map(|package| publish_package(runner, pm, package))
                    .collect()
            });

            for result in results {
                result?;
            }
        }

        Ok(PublishOutcome::Published(summary))
    }

    /// Versions and tags for every planned package, private ones set aside.
    ///
    /// # Errors
    ///
    /// Returns an error if the release version for affected core packages
    /// cannot be determined, or the order names an unknown package.
    pub fn summarize(&self, workspace: &Workspace, order: &PublishOrder) -> Result<PublishSummary> {
        let core = workspace.config.core();
        let release_version = if order.packages().any(|name| core.contains(name)) {
            Some(self.release_version(workspace)?)
        } else {
            None
        };

        let mut summary = PublishSummary {
            release_version: release_version.clone(),
            ..PublishSummary::default()
        };

        for batch in &order.batches {
            let mut planned = Vec::with_capacity(batch.len());
            for name in batch {
                let package = workspace
                    .package(name)
                    .ok_or_else(|| OperationError::UnknownPackage(name.clone()))?;

                if package.private {
                    warn!(package = %name, "private package, not published");
                    summary.skipped_private.push(name.clone());
                    continue;
                }

                let is_core = core.contains(name);
                let new_version = match (&release_version, is_core) {
                    (Some(version), true) => version.clone(),
                    _ => bump_patch(&package.version),
                };
                let tag = select_tag(&new_version, is_core);

                planned.push(PlannedPublish {
                    name: name.clone(),
                    dir: package.path.clone(),
                    current_version: package.version.clone(),
                    new_version,
                    tag,
                    core: is_core,
                });
            }
            if !planned.is_empty() {
                summary.batches.push(planned);
            }
        }

        Ok(summary)
    }

    fn release_version(&self, workspace: &Workspace) -> Result<Version> {
        let core = workspace.config.core();
        let override_value = self
            .environment
            .var(core.version_env())
            .filter(|v| !v.trim().is_empty());

        let mut candidates: Vec<Version> = workspace
            .packages
            .iter()
            .filter(|p| core.contains(&p.name))
            .map(|p| p.version.clone())
            .collect();

        if override_value.is_none() {
            for probe in core.registry_probes() {
                if let Some(version) = self.registry.latest_tag_version(probe, ReleaseTag::Alpha)? {
                    candidates.push(version);
                }
            }
        }

        let version = resolve_release_version(override_value.as_deref(), &candidates)?;
        info!(
            %version,
            overridden = override_value.is_some(),
            "release version for core packages"
        );
        Ok(version)
    }
}

fn publish_package<R: CommandRunner>(
    runner: &R,
    pm: PackageManager,
    package: &PlannedPublish,
) -> Result<()> {
    debug!(package = %package.name, version = %package.new_version, tag = %package.tag, "publishing");
    for step in commands::publish(pm, &package.dir, &package.new_version, package.tag) {
        runner.run(&step)?;
    }
    info!(package = %package.name, version = %package.new_version, "published");
    Ok(())
}
