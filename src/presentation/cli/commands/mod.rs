pub mod doctor;
pub mod init;
pub mod list;
pub mod materialize;
pub mod run_operation;

pub use doctor::DoctorCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use materialize::MaterializeCommand;
pub use run_operation::RunOperationCommand;
