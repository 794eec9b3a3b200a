pub mod config_resolver;
pub mod dispatcher;
pub mod reporter;

pub use config_resolver::ConfigResolver;
pub use dispatcher::{Dispatcher, DEFAULT_WORKERS};
pub use reporter::{ReportEntry, Reporter, RunSummary};
