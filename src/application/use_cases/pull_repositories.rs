use async_trait::async_trait;

use super::operation::{require_checkout, scm_failure, OperationContext, RepositoryOperation};
use crate::domain::entities::{OperationOutcome, RepoTarget};

/// Pull every checkout, stashing local changes first.
#[derive(Debug, Default)]
pub struct PullOperation;

fn is_up_to_date(output: &str) -> bool {
    output.contains("Already up to date") || output.contains("Already up-to-date")
}

#[async_trait]
impl RepositoryOperation for PullOperation {
    fn name(&self) -> &'static str {
        "pull"
    }

    fn quiet_summary(&self) -> &'static str {
        "All repositories are up to date."
    }

    async fn apply(&self, target: &RepoTarget, ctx: &OperationContext) -> OperationOutcome {
        if let Some(skip) = require_checkout(target) {
            return skip;
        }
        if ctx.dry_run {
            return OperationOutcome::dry_run("would stash and pull");
        }

        let path = target.path();
        let dirty = match ctx.scm.status_porcelain(path).await {
            Ok(status) => !status.stdout.trim().is_empty(),
            Err(e) => return scm_failure(e),
        };

        let mut detail = String::new();
        if dirty {
            match ctx.scm.stash(path).await {
                Ok(output) => detail.push_str(&output.combined()),
                Err(e) => return scm_failure(e),
            }
        }

        let output = match ctx.scm.pull(path).await {
            Ok(output) => output,
            Err(e) => return scm_failure(e),
        };
        if !detail.is_empty() {
            detail.push('\n');
        }
        detail.push_str(&output.combined());

        let changed = !is_up_to_date(&output.stdout);
        let summary = match (dirty, changed) {
            (true, true) => "stashed and pulled",
            (true, false) => "stashed, already up to date",
            (false, true) => "pulled",
            (false, false) => "already up to date",
        };
        OperationOutcome::succeeded(summary, dirty || changed).with_detail(detail)
    }
}
