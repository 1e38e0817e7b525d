mod path;
pub mod types;

pub use path::{CurrentDirProvider, FixedPathProvider, StartPathProvider};
pub use types::*;
