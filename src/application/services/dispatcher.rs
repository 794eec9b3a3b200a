use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::application::services::reporter::Reporter;
use crate::application::use_cases::operation::{OperationContext, RepositoryOperation};
use crate::common::error::GitsError;
use crate::common::result::GitsResult;
use crate::domain::entities::{OperationOutcome, RepoTarget};

/// Number of units in flight when `--jobs` is not given.
pub const DEFAULT_WORKERS: usize = 4;

/// Fans an operation out over repositories with bounded concurrency.
///
/// Units are independent: a failing or panicking unit is recorded as a
/// failure for its own repository only. There is no timeout, so a hung
/// external command holds its slot until it exits.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    width: usize,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_WORKERS)
    }
}

impl Dispatcher {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Run `operation` on every target and wait for all of them.
    ///
    /// Group headers are printed here, in submission order, whenever the
    /// group changes (verbose or dry-run only).
    pub async fn dispatch(
        &self,
        targets: Vec<RepoTarget>,
        operation: Arc<dyn RepositoryOperation>,
        context: Arc<OperationContext>,
        reporter: Arc<Reporter>,
    ) -> GitsResult<()> {
        let start_time = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.width));
        let announce_groups = context.verbose || context.dry_run;
        let skips_visible = operation.skips_visible();

        info!(
            operation = operation.name(),
            repositories = targets.len(),
            width = self.width,
            "dispatching"
        );

        let mut current_group: Option<String> = None;
        let mut tasks = Vec::with_capacity(targets.len());

        for target in targets {
            let permit = Arc::clone(&semaphore).acquire_owned().await.map_err(|e| {
                GitsError::internal_error(format!("worker pool closed: {}", e))
            })?;

            if current_group.as_deref() != Some(target.group.as_str()) {
                if announce_groups {
                    reporter.group_header(&target.group);
                }
                current_group = Some(target.group.clone());
            }

            let operation = Arc::clone(&operation);
            let context = Arc::clone(&context);
            let unit_reporter = Arc::clone(&reporter);
            let unit_target = target.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let outcome = operation.apply(&unit_target, &context).await;
                unit_reporter.record(&unit_target, outcome, skips_visible);
            });
            tasks.push((target, handle));
        }

        let (targets, handles): (Vec<_>, Vec<_>) = tasks.into_iter().unzip();
        let results = join_all(handles).await;

        for (target, result) in targets.iter().zip(results) {
            if let Err(join_err) = result {
                warn!(alias = %target.alias(), error = %join_err, "unit did not complete");
                reporter.record(
                    target,
                    OperationOutcome::failed(format!("task aborted: {}", join_err)),
                    skips_visible,
                );
            }
        }

        info!(
            operation = operation.name(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "dispatch finished"
        );
        Ok(())
    }
}
