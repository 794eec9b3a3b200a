pub mod bulk_operation;
pub mod clean_repositories;
pub mod clone_repositories;
pub mod convert_encoding;
pub mod delete_repositories;
pub mod doctor;
pub mod list_groups;
pub mod operation;
pub mod pull_repositories;
pub mod repository_status;
pub mod stash_changes;

pub use bulk_operation::BulkOperationUseCase;
pub use clean_repositories::CleanOperation;
pub use clone_repositories::CloneOperation;
pub use convert_encoding::ConvertOperation;
pub use delete_repositories::DeleteOperation;
pub use doctor::DoctorUseCase;
pub use operation::{OperationContext, RepositoryOperation};
pub use pull_repositories::PullOperation;
pub use repository_status::StatusOperation;
pub use stash_changes::{PopOperation, StashOperation};
