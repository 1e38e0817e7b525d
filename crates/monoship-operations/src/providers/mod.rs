mod environment;
mod filesystem;
mod gate;
mod git;
mod process;
mod project;
mod registry;

pub use environment::ProcessEnvironment;
pub use filesystem::StdFileSystem;
pub use gate::{DelayGate, ThreadSleeper};
pub use git::Git2Provider;
pub use process::ProcessRunner;
pub use project::FileSystemProjectProvider;
pub use registry::NpmRegistry;
