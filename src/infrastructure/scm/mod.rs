/// Version-control adapter.
///
/// Operations talk to git through the [`ScmOperations`] trait; [`GitScm`]
/// is the implementation that shells out to the `git` binary.
pub mod git_scm;
pub mod scm_interface;

pub use git_scm::GitScm;
pub use scm_interface::{CommandOutput, ScmError, ScmOperations};
