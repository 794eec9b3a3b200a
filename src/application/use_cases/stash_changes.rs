use async_trait::async_trait;

use super::operation::{
    require_checkout, require_listed, scm_failure, OperationContext, RepositoryOperation,
};
use crate::domain::entities::{OperationOutcome, RepoTarget};

/// `git stash` in every declared checkout.
#[derive(Debug, Default)]
pub struct StashOperation;

/// `git stash pop` in every declared checkout.
#[derive(Debug, Default)]
pub struct PopOperation;

#[async_trait]
impl RepositoryOperation for StashOperation {
    fn name(&self) -> &'static str {
        "stash"
    }

    fn quiet_summary(&self) -> &'static str {
        "No local changes to stash."
    }

    async fn apply(&self, target: &RepoTarget, ctx: &OperationContext) -> OperationOutcome {
        if let Some(skip) = require_listed(target).or_else(|| require_checkout(target)) {
            return skip;
        }
        if ctx.dry_run {
            return OperationOutcome::dry_run("would stash local changes");
        }

        match ctx.scm.stash(target.path()).await {
            Ok(output) => {
                let text = output.combined();
                if text.contains("No local changes to save") {
                    OperationOutcome::succeeded("nothing to stash", false)
                } else {
                    OperationOutcome::succeeded("stashed", true).with_detail(text)
                }
            }
            Err(e) => scm_failure(e),
        }
    }
}

#[async_trait]
impl RepositoryOperation for PopOperation {
    fn name(&self) -> &'static str {
        "pop"
    }

    fn quiet_summary(&self) -> &'static str {
        "No stashes popped."
    }

    async fn apply(&self, target: &RepoTarget, ctx: &OperationContext) -> OperationOutcome {
        if let Some(skip) = require_listed(target).or_else(|| require_checkout(target)) {
            return skip;
        }
        if ctx.dry_run {
            return OperationOutcome::dry_run("would pop the latest stash");
        }

        // An empty stash makes git exit non-zero, which lands here as a failure
        match ctx.scm.stash_pop(target.path()).await {
            Ok(output) => OperationOutcome::succeeded("popped", true).with_detail(output.combined()),
            Err(e) => scm_failure(e),
        }
    }
}
