use std::fmt;

use indexmap::IndexSet;
use serde::Serialize;

use crate::error::GraphError;
use crate::graph::PackageGraph;

/// A package that both depends on and is depended upon by `neighbours`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleViolation {
    pub package: String,
    pub neighbours: Vec<String>,
}

impl fmt::Display for CycleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.package, self.neighbours.join(", "))
    }
}

/// Pairwise check: intersects each package's dependencies with its
/// dependents. Catches `A <-> B` but not longer rings such as
/// `A -> B -> C -> A`; those are rejected later by the planner.
#[must_use]
pub fn detect_cycles(graph: &PackageGraph) -> Vec<CycleViolation> {
    graph
        .iter()
        .filter_map(|record| {
            let dependents: IndexSet<&String> = record.dependents().collect();
            let neighbours: IndexSet<&String> = record
                .dependencies()
                .filter(|dep| dependents.contains(dep))
                .collect();

            if neighbours.is_empty() {
                return None;
            }
            Some(CycleViolation {
                package: record.name.clone(),
                neighbours: neighbours.into_iter().cloned().collect(),
            })
        })
        .collect()
}

/// # Errors
///
/// Returns `GraphError::CircularDependencies` listing every violation found.
pub fn ensure_acyclic(graph: &PackageGraph) -> Result<(), GraphError> {
    let violations = detect_cycles(graph);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(GraphError::CircularDependencies { violations })
    }
}
