pub mod config_store;
pub mod runtime_paths;
pub mod utf16;

pub use config_store::{ConfigStore, GroupDeclaration, MaterializedPath};
pub use runtime_paths::RuntimePaths;
