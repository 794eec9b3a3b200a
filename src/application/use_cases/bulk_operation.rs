use std::sync::Arc;
use tracing::info;

use super::operation::{OperationContext, RepositoryOperation};
use crate::application::services::dispatcher::Dispatcher;
use crate::application::services::reporter::{Reporter, RunSummary};
use crate::common::result::GitsResult;
use crate::domain::entities::Inventory;

pub const NOTHING_CONFIGURED: &str = "No repositories configured.";

/// Runs one [`RepositoryOperation`] over the selected part of an inventory.
pub struct BulkOperationUseCase {
    dispatcher: Dispatcher,
    context: Arc<OperationContext>,
    reporter: Arc<Reporter>,
}

impl BulkOperationUseCase {
    pub fn new(dispatcher: Dispatcher, context: OperationContext, reporter: Arc<Reporter>) -> Self {
        Self {
            dispatcher,
            context: Arc::new(context),
            reporter,
        }
    }

    /// Dispatch, wait for every unit, run the operation's follow-up step,
    /// then summarize.
    ///
    /// An unknown group is a warning, not an error.
    pub async fn execute(
        &self,
        inventory: &Inventory,
        group_filter: Option<&str>,
        operation: Arc<dyn RepositoryOperation>,
    ) -> GitsResult<RunSummary> {
        if let Some(group) = group_filter {
            if !inventory.has_group(group) {
                self.reporter
                    .warning(format!("repository group '{}' is not configured", group));
                return Ok(self.reporter.finish(None));
            }
        }

        let targets = inventory.filtered(group_filter);
        if targets.is_empty() {
            self.reporter.message(NOTHING_CONFIGURED);
            return Ok(self.reporter.finish(None));
        }

        self.dispatcher
            .dispatch(
                targets,
                Arc::clone(&operation),
                Arc::clone(&self.context),
                Arc::clone(&self.reporter),
            )
            .await?;

        operation
            .after_all(inventory, group_filter, &self.context, &self.reporter)
            .await;

        let summary = self.reporter.finish(Some(operation.quiet_summary()));
        info!(
            operation = operation.name(),
            total = summary.total,
            failures = summary.failures,
            "run finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::clone_repositories::CloneOperation;
    use crate::application::use_cases::operation::test_support::context;
    use crate::domain::entities::{Group, PathSource, Repository, RepositoryEntry, SkipReason};
    use crate::infrastructure::scm::scm_interface::MockScmOperations;
    use tempfile::TempDir;

    fn use_case(mock: MockScmOperations, reporter: Arc<Reporter>) -> BulkOperationUseCase {
        BulkOperationUseCase::new(Dispatcher::default(), context(mock), reporter)
    }

    #[tokio::test]
    async fn test_clone_when_everything_exists() {
        let temp_dir = TempDir::new().unwrap();
        let mut group = Group::new("tools");
        for alias in ["a", "b", "c"] {
            let path = temp_dir.path().join(alias);
            std::fs::create_dir_all(&path).unwrap();
            let entry = RepositoryEntry::new(alias, "u");
            group = group.with_repository(
                Repository::declared(&entry, path, PathSource::Explicit).unwrap(),
            );
        }
        let inventory = Inventory::new(temp_dir.path(), vec![group]);

        let mut mock = MockScmOperations::new();
        mock.expect_clone_repository().times(0);
        let reporter = Arc::new(Reporter::capturing(false));

        let summary = use_case(mock, reporter.clone())
            .execute(&inventory, None, Arc::new(CloneOperation))
            .await
            .unwrap();

        assert_eq!(summary.total, 3);
        assert!(summary
            .entries
            .iter()
            .all(|e| e.outcome.skip_reason() == Some(SkipReason::Exists)));
        let lines = reporter.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("All repositories are already cloned."));
        assert!(!lines[0].contains(NOTHING_CONFIGURED));
    }

    #[tokio::test]
    async fn test_empty_inventory_is_reported() {
        let reporter = Arc::new(Reporter::capturing(false));
        let inventory = Inventory::new("/home/ann", vec![Group::new("empty")]);

        let summary = use_case(MockScmOperations::new(), reporter.clone())
            .execute(&inventory, None, Arc::new(CloneOperation))
            .await
            .unwrap();

        assert_eq!(summary.total, 0);
        assert_eq!(reporter.lines(), vec![NOTHING_CONFIGURED.to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_group_warns() {
        let reporter = Arc::new(Reporter::capturing(false));
        let inventory = Inventory::new("/home/ann", vec![Group::new("tools")]);

        let summary = use_case(MockScmOperations::new(), reporter.clone())
            .execute(&inventory, Some("nope"), Arc::new(CloneOperation))
            .await
            .unwrap();

        assert_eq!(summary.total, 0);
        assert!(!summary.has_failures());
        assert!(reporter.lines()[0].starts_with("warning:"));
    }
}
