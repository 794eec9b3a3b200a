use async_trait::async_trait;

use super::operation::{require_checkout, scm_failure, OperationContext, RepositoryOperation};
use crate::domain::entities::{OperationOutcome, RepoTarget};

/// Read-only working tree status.
///
/// Uncloned repositories are reported even outside verbose mode. Verbose
/// runs also list stash entries.
#[derive(Debug, Default)]
pub struct StatusOperation;

fn summarize(short_status: &str) -> String {
    let lines: Vec<&str> = short_status.lines().filter(|l| !l.trim().is_empty()).collect();
    match lines.as_slice() {
        [] => "clean".to_string(),
        [single] => single.trim().to_string(),
        many => format!("{} changed paths", many.len()),
    }
}

#[async_trait]
impl RepositoryOperation for StatusOperation {
    fn name(&self) -> &'static str {
        "status"
    }

    fn quiet_summary(&self) -> &'static str {
        "All repositories are clean."
    }

    fn skips_visible(&self) -> bool {
        true
    }

    async fn apply(&self, target: &RepoTarget, ctx: &OperationContext) -> OperationOutcome {
        if let Some(skip) = require_checkout(target) {
            return skip;
        }
        if ctx.dry_run {
            return OperationOutcome::dry_run("would show status");
        }

        let status = match ctx.scm.status_short(target.path()).await {
            Ok(output) => output,
            Err(e) => return scm_failure(e),
        };
        let mut detail = status.stdout.trim_end().to_string();

        if ctx.verbose {
            match ctx.scm.stash_list(target.path()).await {
                Ok(stashes) if !stashes.stdout.trim().is_empty() => {
                    if !detail.is_empty() {
                        detail.push('\n');
                    }
                    detail.push_str("stash:\n");
                    detail.push_str(stashes.stdout.trim_end());
                }
                Ok(_) => {}
                Err(e) => return scm_failure(e),
            }
        }

        let changed = !status.stdout.trim().is_empty();
        OperationOutcome::succeeded(summarize(&status.stdout), changed).with_detail(detail)
    }
}
