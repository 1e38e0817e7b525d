use thiserror::Error;

use crate::cycles::CycleViolation;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("circular dependencies detected: {}", format_violations(violations))]
    CircularDependencies { violations: Vec<CycleViolation> },

    #[error("no changes detected")]
    NoChanges,

    #[error("dependency cycle among packages: {}", remaining.join(", "))]
    CycleInPlan { remaining: Vec<String> },
}

fn format_violations(violations: &[CycleViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
