/// Infrastructure layer modules
///
/// Concrete implementations for external system interactions:
/// - Configuration file reading and rewriting
/// - Runtime path resolution (home, config location)
/// - UTF-16 to UTF-8 file conversion
/// - The git command adapter
pub mod filesystem;
pub mod scm;

// Re-export commonly used types
pub use filesystem::{ConfigStore, RuntimePaths};
pub use scm::{CommandOutput, GitScm, ScmError, ScmOperations};
