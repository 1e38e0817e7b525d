mod command_runner;
mod environment;
mod filesystem;
mod gate;
mod git_provider;
mod project_provider;
mod registry;

pub use command_runner::{CommandOutput, CommandRunner, CommandSpec};
pub use environment::EnvironmentProvider;
pub use filesystem::FileSystem;
pub use gate::{ConfirmationGate, Sleeper};
pub use git_provider::GitProvider;
pub use project_provider::ProjectProvider;
pub use registry::RegistryProvider;
