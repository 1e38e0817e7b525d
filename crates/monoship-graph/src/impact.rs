use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;

use crate::error::GraphError;
use crate::graph::PackageGraph;

struct PackageDir<'a> {
    name: &'a str,
    dir: PathBuf,
    depth: usize,
}

/// Packages owning at least one of `changes`, in graph order.
///
/// Relative paths are resolved against `root`. When package directories nest,
/// a file belongs to the most deeply nested package containing it.
#[must_use]
pub fn directly_changed(graph: &PackageGraph, root: &Path, changes: &[PathBuf]) -> Vec<String> {
    let mut dirs: Vec<PackageDir<'_>> = graph
        .iter()
        .map(|record| {
            let dir = if record.path.is_absolute() {
                record.path.clone()
            } else {
                root.join(&record.path)
            };
            PackageDir {
                name: &record.name,
                depth: dir.components().count(),
                dir,
            }
        })
        .collect();
    dirs.sort_by(|a, b| b.depth.cmp(&a.depth));

    let mut changed: IndexSet<&str> = IndexSet::new();
    for file in changes {
        let abs_file = if file.is_absolute() {
            file.clone()
        } else {
            root.join(file)
        };

        if let Some(owner) = dirs.iter().find(|d| abs_file.starts_with(&d.dir)) {
            changed.insert(owner.name);
        }
    }

    graph
        .iter()
        .filter(|record| changed.contains(record.name.as_str()))
        .map(|record| record.name.clone())
        .collect()
}

/// Directly changed packages plus everything that transitively depends on
/// them through runtime or development edges.
///
/// # Errors
///
/// Returns `GraphError::NoChanges` when `changes` is empty: an empty change
/// set means change detection failed upstream, not that nothing changed.
pub fn resolve_affected(
    graph: &PackageGraph,
    root: &Path,
    changes: &[PathBuf],
) -> Result<IndexSet<String>, GraphError> {
    if changes.is_empty() {
        return Err(GraphError::NoChanges);
    }

    let mut affected: IndexSet<String> = IndexSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();

    for name in directly_changed(graph, root, changes) {
        if affected.insert(name.clone()) {
            queue.push_back(name);
        }
    }

    while let Some(name) = queue.pop_front() {
        let Some(record) = graph.get(&name) else {
            continue;
        };
        for dependent in record.dependents() {
            if affected.insert(dependent.clone()) {
                queue.push_back(dependent.clone());
            }
        }
    }

    Ok(affected)
}
