/// Application layer
///
/// Services shared by every run (configuration resolution, dispatch,
/// reporting) and one use case per command.
pub mod services;
pub mod use_cases;
