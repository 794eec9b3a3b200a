use async_trait::async_trait;

use super::operation::{
    require_checkout, require_listed, scm_failure, OperationContext, RepositoryOperation,
};
use crate::domain::entities::{OperationOutcome, RepoTarget};

/// Discard local modifications and untracked files. Destructive.
#[derive(Debug, Default)]
pub struct CleanOperation;

#[async_trait]
impl RepositoryOperation for CleanOperation {
    fn name(&self) -> &'static str {
        "clean"
    }

    fn quiet_summary(&self) -> &'static str {
        "All repositories are clean."
    }

    async fn apply(&self, target: &RepoTarget, ctx: &OperationContext) -> OperationOutcome {
        if let Some(skip) = require_listed(target).or_else(|| require_checkout(target)) {
            return skip;
        }
        if ctx.dry_run {
            return OperationOutcome::dry_run("would reset and remove untracked files");
        }

        let path = target.path();
        let dirty = match ctx.scm.status_porcelain(path).await {
            Ok(status) => !status.stdout.trim().is_empty(),
            Err(e) => return scm_failure(e),
        };
        if let Err(e) = ctx.scm.reset_hard(path).await {
            return scm_failure(e);
        }
        let removed = match ctx.scm.clean_untracked(path).await {
            Ok(output) => output,
            Err(e) => return scm_failure(e),
        };

        let changed = dirty || !removed.stdout.trim().is_empty();
        let summary = if changed { "cleaned" } else { "already clean" };
        OperationOutcome::succeeded(summary, changed).with_detail(removed.combined())
    }
}
