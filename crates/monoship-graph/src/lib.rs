//! The package dependency graph of a workspace and the algorithms run over it:
//! pairwise cycle detection, change-impact closure and layered publish ordering.

mod cycles;
mod error;
mod graph;
mod impact;
mod order;

pub use cycles::{CycleViolation, detect_cycles, ensure_acyclic};
pub use error::GraphError;
pub use graph::{PackageGraph, PackageRecord};
pub use impact::{directly_changed, resolve_affected};
pub use order::{PublishOrder, plan_batches, plan_publish_order};

pub type Result<T> = std::result::Result<T, GraphError>;
