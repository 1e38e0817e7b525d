use std::path::PathBuf;

use indexmap::IndexMap;
use monoship_core::PackageInfo;
use semver::Version;
use serde::Serialize;
use tracing::info;

/// A package and its in-workspace edges.
///
/// `uses`/`uses_dev` are declared dependencies inside the project scope that
/// resolve to a package of the graph. `used_by`/`used_by_dev` are their
/// reverse edges and are only ever appended to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRecord {
    pub name: String,
    pub path: PathBuf,
    pub version: Version,
    pub uses: Vec<String>,
    pub uses_dev: Vec<String>,
    pub used_by: Vec<String>,
    pub used_by_dev: Vec<String>,
}

impl PackageRecord {
    fn from_package(package: &PackageInfo, scope: &str) -> Self {
        Self {
            name: package.name.clone(),
            path: package.path.clone(),
            version: package.version.clone(),
            uses: in_scope(&package.dependencies, scope),
            uses_dev: in_scope(&package.dev_dependencies, scope),
            used_by: Vec::new(),
            used_by_dev: Vec::new(),
        }
    }

    /// Runtime and development dependencies, runtime first.
    pub fn dependencies(&self) -> impl Iterator<Item = &String> {
        self.uses.iter().chain(&self.uses_dev)
    }

    /// Runtime and development dependents, runtime first.
    pub fn dependents(&self) -> impl Iterator<Item = &String> {
        self.used_by.iter().chain(&self.used_by_dev)
    }
}

fn in_scope(names: &[String], scope: &str) -> Vec<String> {
    names
        .iter()
        .filter(|name| name.starts_with(scope))
        .cloned()
        .collect()
}

/// Name → record, in package discovery order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct PackageGraph {
    packages: IndexMap<String, PackageRecord>,
}

impl PackageGraph {
    /// Builds the cross-linked graph.
    ///
    /// Dependencies outside `scope` are ignored. In-scope dependencies on
    /// packages that are not part of the workspace are logged and dropped.
    #[must_use]
    pub fn build(packages: &[PackageInfo], scope: &str) -> Self {
        let mut records: IndexMap<String, PackageRecord> = packages
            .iter()
            .map(|p| (p.name.clone(), PackageRecord::from_package(p, scope)))
            .collect();

        let names: Vec<String> = records.keys().cloned().collect();
        for source in &names {
            let (uses, uses_dev) = match records.get(source) {
                Some(record) => (record.uses.clone(), record.uses_dev.clone()),
                None => continue,
            };

            let uses = link(&mut records, source, uses, false);
            let uses_dev = link(&mut records, source, uses_dev, true);

            if let Some(record) = records.get_mut(source) {
                record.uses = uses;
                record.uses_dev = uses_dev;
            }
        }

        Self { packages: records }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PackageRecord> {
        self.packages.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackageRecord> {
        self.packages.values()
    }

    /// Position of `name` in discovery order.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.packages.get_index_of(name)
    }
}

/// Appends `source` to the reverse list of each target and returns the
/// targets that exist in the graph.
fn link(
    records: &mut IndexMap<String, PackageRecord>,
    source: &str,
    targets: Vec<String>,
    dev: bool,
) -> Vec<String> {
    let mut resolved = Vec::with_capacity(targets.len());
    for target in targets {
        let Some(record) = records.get_mut(&target) else {
            info!(
                package = source,
                dependency = %target,
                "dependency is not part of the workspace, skipping"
            );
            continue;
        };
        if dev {
            record.used_by_dev.push(source.to_string());
        } else {
            record.used_by.push(source.to_string());
        }
        resolved.push(target);
    }
    resolved
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SCOPE: &str = "@acme/";

    pub(crate) fn make_package(name: &str, deps: &[&str], dev_deps: &[&str]) -> PackageInfo {
        let short = name.trim_start_matches(SCOPE);
        let mut package = PackageInfo::new(
            name,
            Version::new(1, 0, 0),
            PathBuf::from("/ws/packages").join(short),
        );
        package.dependencies = deps.iter().map(ToString::to_string).collect();
        package.dev_dependencies = dev_deps.iter().map(ToString::to_string).collect();
        package
    }

    /// `(name, runtime deps)` pairs, names without the scope prefix.
    pub(crate) fn graph_of(edges: &[(&str, &[&str])]) -> PackageGraph {
        let packages: Vec<PackageInfo> = edges
            .iter()
            .map(|(name, deps)| {
                let deps: Vec<String> = deps.iter().map(|d| format!("{SCOPE}{d}")).collect();
                let deps: Vec<&str> = deps.iter().map(String::as_str).collect();
                make_package(&format!("{SCOPE}{name}"), &deps, &[])
            })
            .collect();
        PackageGraph::build(&packages, SCOPE)
    }

    fn record<'a>(graph: &'a PackageGraph, name: &str) -> &'a PackageRecord {
        graph.get(name).expect("package should be in graph")
    }

    #[test]
    fn only_scoped_dependencies_become_edges() {
        let packages = vec![
            make_package("@acme/util", &[], &[]),
            make_package("@acme/app", &["@acme/util", "react", "@other/x"], &[]),
        ];

        let graph = PackageGraph::build(&packages, SCOPE);

        assert_eq!(record(&graph, "@acme/app").uses, vec!["@acme/util"]);
        assert_eq!(record(&graph, "@acme/util").used_by, vec!["@acme/app"]);
    }

    #[test]
    fn dev_dependencies_get_separate_edges() {
        let packages = vec![
            make_package("@acme/testkit", &[], &[]),
            make_package("@acme/app", &[], &["@acme/testkit"]),
        ];

        let graph = PackageGraph::build(&packages, SCOPE);

        let app = record(&graph, "@acme/app");
        assert!(app.uses.is_empty());
        assert_eq!(app.uses_dev, vec!["@acme/testkit"]);
        let testkit = record(&graph, "@acme/testkit");
        assert!(testkit.used_by.is_empty());
        assert_eq!(testkit.used_by_dev, vec!["@acme/app"]);
    }

    #[test]
    fn unknown_scoped_dependencies_are_dropped() {
        let packages = vec![make_package("@acme/app", &["@acme/published-elsewhere"], &[])];

        let graph = PackageGraph::build(&packages, SCOPE);

        assert!(record(&graph, "@acme/app").uses.is_empty());
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn reverse_edges_are_symmetric() {
        let packages = vec![
            make_package("@acme/a", &[], &[]),
            make_package("@acme/b", &["@acme/a"], &[]),
            make_package("@acme/c", &["@acme/a", "@acme/b"], &["@acme/d"]),
            make_package("@acme/d", &["@acme/c"], &["@acme/a", "@acme/b"]),
        ];
        let graph = PackageGraph::build(&packages, SCOPE);

        for package in graph.iter() {
            for dependent in &package.used_by {
                assert!(record(&graph, dependent).uses.contains(&package.name));
            }
            for dependency in &package.uses {
                assert!(record(&graph, dependency).used_by.contains(&package.name));
            }
            for dependent in &package.used_by_dev {
                assert!(record(&graph, dependent).uses_dev.contains(&package.name));
            }
            for dependency in &package.uses_dev {
                assert!(record(&graph, dependency).used_by_dev.contains(&package.name));
            }
        }
        assert_eq!(record(&graph, "@acme/a").used_by_dev, vec!["@acme/d"]);
        assert_eq!(record(&graph, "@acme/d").used_by_dev, vec!["@acme/c"]);
    }

    #[test]
    fn reverse_edges_keep_discovery_order() {
        let graph = graph_of(&[("a", &[]), ("c", &["a"]), ("b", &["a"])]);

        assert_eq!(
            record(&graph, "@acme/a").used_by,
            vec!["@acme/c", "@acme/b"]
        );
        assert_eq!(graph.index_of("@acme/b"), Some(2));
    }

    #[test]
    fn serializes_as_name_keyed_map() {
        let graph = graph_of(&[("a", &[]), ("b", &["a"])]);

        let json = serde_json::to_value(&graph).expect("graph serializes");

        assert_eq!(json["@acme/b"]["uses"][0], "@acme/a");
        assert_eq!(json["@acme/a"]["version"], "1.0.0");
    }
}
