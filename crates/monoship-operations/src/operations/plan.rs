use std::path::Path;

use indexmap::IndexSet;
use monoship_graph::{
    PackageGraph, PublishOrder, directly_changed, ensure_acyclic, plan_publish_order,
    resolve_affected,
};
use monoship_project::Workspace;
use tracing::info;

use super::changes::{ChangeCollector, ChangeSet};
use crate::Result;
use crate::traits::{GitProvider, ProjectProvider};

#[derive(Debug, Clone, Default)]
pub struct PlanInput {
    pub all_repos: bool,
    /// Overrides `skip_leading_batches` from the configuration.
    pub skip_batches: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct PlanOutput {
    pub workspace: Workspace,
    pub graph: PackageGraph,
    pub changes: ChangeSet,
    pub directly_changed: Vec<String>,
    pub affected: IndexSet<String>,
    pub order: PublishOrder,
}

/// Loader, graph, cycle check, change collection, impact and ordering,
/// without running anything.
pub struct PlanOperation<P, G> {
    project_provider: P,
    change_collector: ChangeCollector<G>,
}

impl<P, G> PlanOperation<P, G>
where
    P: ProjectProvider,
    G: GitProvider,
{
    pub fn new(project_provider: P, git_provider: G) -> Self {
        Self {
            project_provider,
            change_collector: ChangeCollector::new(git_provider),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the workspace cannot be loaded, the graph has
    /// mutual dependencies, change detection fails or finds nothing, or the
    /// affected packages cannot be ordered.
    pub fn execute(&self, start_path: &Path, input: &PlanInput) -> Result<PlanOutput> {
        let workspace = self.project_provider.discover_workspace(start_path)?;
        info!(
            root = %workspace.root.display(),
            packages = workspace.packages.len(),
            "loaded workspace"
        );

        let graph = PackageGraph::build(&workspace.packages, workspace.config.scope());
        ensure_acyclic(&graph)?;

        let changes = self.change_collector.collect(
            &workspace.root,
            workspace.config.repos(),
            input.all_repos,
        )?;

        let directly_changed = directly_changed(&graph, &workspace.root, &changes.files);
        let affected = resolve_affected(&graph, &workspace.root, &changes.files)?;
        info!(
            changed = directly_changed.len(),
            affected = affected.len(),
            "resolved affected packages"
        );

        let skip = input
            .skip_batches
            .unwrap_or_else(|| workspace.config.skip_leading_batches());
        let order = plan_publish_order(&graph, &affected, skip)?;
        info!(batches = order.batches.len(), "planned publish order");

        Ok(PlanOutput {
            workspace,
            graph,
            changes,
            directly_changed,
            affected,
            order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OperationError;
    use crate::mocks::{
        MockGitProvider, MockProjectProvider, ROOT, SCOPE, commit_at, make_package,
        make_workspace, modified,
    };
    use monoship_graph::GraphError;
    use monoship_project::MonoshipConfig;

    fn chain_workspace(config: MonoshipConfig) -> Workspace {
        // cli -> core -> utils, docs standalone
        make_workspace(
            config,
            vec![
                make_package("@acme/cli", "1.0.0", &["@acme/core"]),
                make_package("@acme/core", "1.0.0", &["@acme/utils"]),
                make_package("@acme/utils", "1.0.0", &[]),
                make_package("@acme/docs", "1.0.0", &[]),
            ],
        )
    }

    fn git_touching(paths: &[&str]) -> MockGitProvider {
        MockGitProvider::new().with_repo(ROOT, commit_at("abc", 1, 1), modified(paths))
    }

    #[test]
    fn change_in_leaf_affects_all_dependents_in_order() {
        let project = MockProjectProvider::new(chain_workspace(MonoshipConfig::new(SCOPE)));
        let operation = PlanOperation::new(project, git_touching(&["packages/utils/index.js"]));

        let output = operation
            .execute(Path::new(ROOT), &PlanInput::default())
            .expect("plan should succeed");

        assert_eq!(output.directly_changed, vec!["@acme/utils"]);
        assert_eq!(output.affected.len(), 3);
        assert!(!output.affected.contains("@acme/docs"));
        assert_eq!(
            output.order.batches,
            vec![vec!["@acme/utils"], vec!["@acme/core"], vec!["@acme/cli"]]
        );
    }

    #[test]
    fn configured_skip_drops_leading_batches() {
        let config = MonoshipConfig::new(SCOPE).with_skip_leading_batches(1);
        let project = MockProjectProvider::new(chain_workspace(config));
        let operation = PlanOperation::new(project, git_touching(&["packages/utils/index.js"]));

        let output = operation
            .execute(Path::new(ROOT), &PlanInput::default())
            .expect("plan should succeed");

        assert_eq!(output.order.skipped, vec![vec!["@acme/utils"]]);
        assert_eq!(output.order.batches.len(), 2);
    }

    #[test]
    fn input_skip_overrides_configuration() {
        let config = MonoshipConfig::new(SCOPE).with_skip_leading_batches(2);
        let project = MockProjectProvider::new(chain_workspace(config));
        let operation = PlanOperation::new(project, git_touching(&["packages/utils/index.js"]));
        let input = PlanInput {
            all_repos: false,
            skip_batches: Some(0),
        };

        let output = operation
            .execute(Path::new(ROOT), &input)
            .expect("plan should succeed");

        assert!(output.order.skipped.is_empty());
        assert_eq!(output.order.batches.len(), 3);
    }

    #[test]
    fn file_outside_packages_affects_nothing() {
        let project = MockProjectProvider::new(chain_workspace(MonoshipConfig::new(SCOPE)));
        let operation = PlanOperation::new(project, git_touching(&["README.md"]));

        let output = operation
            .execute(Path::new(ROOT), &PlanInput::default())
            .expect("plan should succeed");

        assert!(output.affected.is_empty());
        assert!(output.order.is_empty());
    }

    #[test]
    fn empty_commit_is_no_changes() {
        let project = MockProjectProvider::new(chain_workspace(MonoshipConfig::new(SCOPE)));
        let operation = PlanOperation::new(project, git_touching(&[]));

        let result = operation.execute(Path::new(ROOT), &PlanInput::default());

        assert!(matches!(
            result,
            Err(OperationError::Graph(GraphError::NoChanges))
        ));
    }

    #[test]
    fn mutual_dependency_fails_before_change_detection() {
        let workspace = make_workspace(
            MonoshipConfig::new(SCOPE),
            vec![
                make_package("@acme/a", "1.0.0", &["@acme/b"]),
                make_package("@acme/b", "1.0.0", &["@acme/a"]),
            ],
        );
        let operation = PlanOperation::new(
            MockProjectProvider::new(workspace),
            MockGitProvider::new(),
        );

        let result = operation.execute(Path::new(ROOT), &PlanInput::default());

        assert!(matches!(
            result,
            Err(OperationError::Graph(GraphError::CircularDependencies { .. }))
        ));
    }
}
