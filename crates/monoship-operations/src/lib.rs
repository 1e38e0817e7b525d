//! Operations behind the `monoship` commands, written against provider
//! traits so they can run on mocks as well as on the real filesystem, git,
//! processes and registry.

mod error;
pub mod operations;
pub mod providers;
pub mod traits;
mod types;

#[cfg(test)]
pub mod mocks;

pub use error::{OperationError, Result};
pub use types::{PlannedPublish, PublishSummary};
