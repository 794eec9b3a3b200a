pub mod group;
pub mod inventory;
pub mod outcome;
pub mod repository;

pub use group::Group;
pub use inventory::{Inventory, RepoTarget};
pub use outcome::{OperationOutcome, SkipReason};
pub use repository::{PathSource, Repository, RepositoryEntry};
