use async_trait::async_trait;
use tracing::debug;

use super::operation::{scm_failure, OperationContext, RepositoryOperation};
use crate::domain::entities::{OperationOutcome, RepoTarget, SkipReason};

/// Clone every declared repository that is not on disk yet.
#[derive(Debug, Default)]
pub struct CloneOperation;

#[async_trait]
impl RepositoryOperation for CloneOperation {
    fn name(&self) -> &'static str {
        "clone"
    }

    fn quiet_summary(&self) -> &'static str {
        "All repositories are already cloned."
    }

    async fn apply(&self, target: &RepoTarget, ctx: &OperationContext) -> OperationOutcome {
        let repository = &target.repository;
        let url = match (&repository.url, repository.unlisted) {
            (Some(url), false) => url,
            _ => {
                debug!(alias = %target.alias(), "skip: unlisted, nothing to clone from");
                return OperationOutcome::skipped(SkipReason::Unlisted);
            }
        };

        if repository.exists() {
            debug!(alias = %target.alias(), "skip: target path exists");
            return OperationOutcome::skipped(SkipReason::Exists);
        }

        if ctx.dry_run {
            return OperationOutcome::dry_run(format!(
                "would clone {} into {}",
                url,
                target.path().display()
            ));
        }

        if let Some(parent) = target.path().parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                return OperationOutcome::failed(format!(
                    "cannot create {}: {}",
                    parent.display(),
                    e
                ));
            }
        }

        match ctx.scm.clone_repository(url, target.path()).await {
            Ok(output) => OperationOutcome::succeeded("cloned", true).with_detail(output.combined()),
            Err(e) => scm_failure(e),
        }
    }
}
