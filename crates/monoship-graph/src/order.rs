use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use tracing::warn;

use crate::error::GraphError;
use crate::graph::PackageGraph;

/// Batches in execution order plus the leading batches that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublishOrder {
    pub batches: Vec<Vec<String>>,
    pub skipped: Vec<Vec<String>>,
}

impl PublishOrder {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches.iter().all(Vec::is_empty)
    }

    pub fn packages(&self) -> impl Iterator<Item = &String> {
        self.batches.iter().flatten()
    }
}

/// Layered topological sort (Kahn) of the sub-graph induced by `affected`.
///
/// Every package lands in exactly one batch, strictly after all of its
/// affected dependencies, and each batch holds every package whose
/// dependencies are already scheduled. Edges leaving `affected` are ignored.
///
/// # Errors
///
/// Returns `GraphError::CycleInPlan` with the packages on the cycle when the
/// induced sub-graph is not acyclic.
pub fn plan_batches(
    graph: &PackageGraph,
    affected: &IndexSet<String>,
) -> Result<Vec<Vec<String>>, GraphError> {
    let mut nodes: Vec<&str> = affected
        .iter()
        .filter(|name| graph.contains(name))
        .map(String::as_str)
        .collect();
    nodes.sort_by_key(|name| graph.index_of(name));

    let mut in_degree: IndexMap<&str, usize> = nodes.iter().map(|n| (*n, 0)).collect();
    let mut successors: IndexMap<&str, IndexSet<&str>> = IndexMap::new();

    for node in &nodes {
        let Some(record) = graph.get(node) else {
            continue;
        };
        let targets: IndexSet<&str> = record
            .dependents()
            .map(String::as_str)
            .filter(|dependent| in_degree.contains_key(dependent))
            .collect();
        for target in &targets {
            if let Some(degree) = in_degree.get_mut(target) {
                *degree += 1;
            }
        }
        successors.insert(*node, targets);
    }

    let mut batches = Vec::new();
    while !in_degree.is_empty() {
        let ready: Vec<&str> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(name, _)| *name)
            .collect();

        if ready.is_empty() {
            return Err(GraphError::CycleInPlan {
                remaining: cycle_members(&in_degree, &successors),
            });
        }

        for name in &ready {
            in_degree.shift_remove(name);
            for successor in successors.get(name).into_iter().flatten() {
                if let Some(degree) = in_degree.get_mut(successor) {
                    *degree -= 1;
                }
            }
        }

        batches.push(ready.into_iter().map(ToString::to_string).collect());
    }

    Ok(batches)
}

/// Strips packages that merely sit downstream of a cycle from a stalled
/// sort: anything without an unscheduled dependent cannot close a loop.
fn cycle_members(
    stalled: &IndexMap<&str, usize>,
    successors: &IndexMap<&str, IndexSet<&str>>,
) -> Vec<String> {
    let mut members: IndexSet<&str> = stalled.keys().copied().collect();
    loop {
        let sinks: Vec<&str> = members
            .iter()
            .copied()
            .filter(|name| {
                !successors
                    .get(name)
                    .is_some_and(|next| next.iter().any(|n| members.contains(n)))
            })
            .collect();
        if sinks.is_empty() {
            break;
        }
        for sink in sinks {
            members.shift_remove(sink);
        }
    }
    members.into_iter().map(ToString::to_string).collect()
}

/// [`plan_batches`] followed by dropping the first `skip_leading` batches.
///
/// # Errors
///
/// Propagates `GraphError::CycleInPlan` from [`plan_batches`].
pub fn plan_publish_order(
    graph: &PackageGraph,
    affected: &IndexSet<String>,
    skip_leading: usize,
) -> Result<PublishOrder, GraphError> {
    let mut batches = plan_batches(graph, affected)?;
    let split = skip_leading.min(batches.len());
    let skipped: Vec<Vec<String>> = batches.drain(..split).collect();

    for (index, batch) in skipped.iter().enumerate() {
        warn!(batch = index, packages = ?batch, "skipping leading batch");
    }

    Ok(PublishOrder { batches, skipped })
}
