mod config;
mod error;
mod manifest;
mod project;

pub const CONFIG_FILE_NAME: &str = "monoship.toml";
pub const MANIFEST_FILE_NAME: &str = "package.json";

pub use config::{CoreConfig, DelayConfig, GateMode, MonoshipConfig, RepoConfig, parse_config};
pub use error::ProjectError;
pub use manifest::read_package_manifest;
pub use project::{
    Workspace, discover_packages, discover_workspace, find_workspace_root,
    load_workspace_config,
};

pub type Result<T> = std::result::Result<T, ProjectError>;
