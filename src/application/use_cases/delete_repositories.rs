use async_trait::async_trait;
use colored::Colorize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::operation::{OperationContext, RepositoryOperation};
use crate::application::services::reporter::Reporter;
use crate::domain::entities::{Inventory, OperationOutcome, RepoTarget, SkipReason};

/// Remove declared, unprotected checkouts, then any group root left empty.
#[derive(Debug, Default)]
pub struct DeleteOperation;

async fn canonical(path: PathBuf) -> PathBuf {
    tokio::fs::canonicalize(&path).await.unwrap_or(path)
}

/// Whether `path` holds nothing except entries listed in `pending`.
async fn is_empty_dir(path: &Path, pending: &HashSet<PathBuf>) -> std::io::Result<bool> {
    let mut entries = tokio::fs::read_dir(path).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !pending.contains(&canonical(entry.path()).await) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Checkouts a dry run reported it would remove.
async fn pending_removals(reporter: &Reporter) -> HashSet<PathBuf> {
    let mut pending = HashSet::new();
    for entry in reporter.entries() {
        if matches!(entry.outcome, OperationOutcome::DryRun { .. }) {
            pending.insert(canonical(entry.path).await);
        }
    }
    pending
}

#[async_trait]
impl RepositoryOperation for DeleteOperation {
    fn name(&self) -> &'static str {
        "delete"
    }

    fn quiet_summary(&self) -> &'static str {
        "No repositories deleted."
    }

    async fn apply(&self, target: &RepoTarget, ctx: &OperationContext) -> OperationOutcome {
        let repository = &target.repository;
        if !repository.exists() {
            return OperationOutcome::skipped(SkipReason::NotCloned);
        }
        if repository.unlisted {
            debug!(alias = %target.alias(), "skip: unlisted repositories are never deleted");
            return OperationOutcome::skipped(SkipReason::Unlisted);
        }
        if repository.do_not_delete {
            debug!(alias = %target.alias(), "skip: do_not_delete");
            return OperationOutcome::skipped(SkipReason::Protected);
        }

        if ctx.dry_run {
            return OperationOutcome::dry_run(format!("would remove {}", target.path().display()));
        }

        let path = target.path().to_path_buf();
        match tokio::task::spawn_blocking(move || std::fs::remove_dir_all(&path)).await {
            Ok(Ok(())) => OperationOutcome::succeeded("deleted", true),
            Ok(Err(e)) => OperationOutcome::failed(format!("cannot remove directory: {}", e)),
            Err(e) => OperationOutcome::failed(format!("removal task failed: {}", e)),
        }
    }

    /// Remove group roots emptied by this run. Non-empty roots are only
    /// reported and missing ones ignored.
    async fn after_all(
        &self,
        inventory: &Inventory,
        group_filter: Option<&str>,
        ctx: &OperationContext,
        reporter: &Reporter,
    ) {
        let pending = if ctx.dry_run {
            pending_removals(reporter).await
        } else {
            HashSet::new()
        };

        for group in inventory.selected_groups(group_filter) {
            let root = group.root(inventory.home());
            if !root.is_dir() {
                continue;
            }

            match is_empty_dir(&root, &pending).await {
                Ok(true) if ctx.dry_run => reporter.message(format!(
                    "   {} (dry-run) would remove empty group root {} -> {}",
                    "~".cyan(),
                    group.name,
                    root.display()
                )),
                Ok(true) => match tokio::fs::remove_dir(&root).await {
                    Ok(()) => reporter.message(format!(
                        "   {} removed empty group root {} -> {}",
                        "✓".green(),
                        group.name,
                        root.display()
                    )),
                    Err(e) => reporter.warning(format!(
                        "cannot remove group root {}: {}",
                        root.display(),
                        e
                    )),
                },
                Ok(false) => reporter.message(format!(
                    "   {} group root {} is not empty -> {}",
                    "!".yellow(),
                    group.name,
                    root.display()
                )),
                Err(e) => reporter.warning(format!("cannot read group root {}: {}", root.display(), e)),
            }
        }
    }
}
