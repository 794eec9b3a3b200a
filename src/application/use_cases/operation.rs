use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::application::services::reporter::Reporter;
use crate::domain::entities::{Inventory, OperationOutcome, RepoTarget, SkipReason};
use crate::infrastructure::scm::{ScmError, ScmOperations};

/// Everything a unit of work needs besides its target.
pub struct OperationContext {
    pub scm: Arc<dyn ScmOperations>,
    pub dry_run: bool,
    pub verbose: bool,
}

impl OperationContext {
    pub fn new(scm: Arc<dyn ScmOperations>) -> Self {
        Self {
            scm,
            dry_run: false,
            verbose: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// A bulk action applied to each repository independently.
///
/// `apply` never returns an error: every problem becomes an
/// [`OperationOutcome`] so one repository cannot abort the others.
#[async_trait]
pub trait RepositoryOperation: Send + Sync {
    fn name(&self) -> &'static str;

    /// Printed once when the run produced no per-repository line.
    fn quiet_summary(&self) -> &'static str;

    /// Whether skips are printed outside verbose mode.
    fn skips_visible(&self) -> bool {
        false
    }

    async fn apply(&self, target: &RepoTarget, ctx: &OperationContext) -> OperationOutcome;

    /// Runs once after every unit has completed.
    async fn after_all(
        &self,
        _inventory: &Inventory,
        _group_filter: Option<&str>,
        _ctx: &OperationContext,
        _reporter: &Reporter,
    ) {
    }
}

/// Skip unless the working copy exists and carries a `.git` marker.
pub(crate) fn require_checkout(target: &RepoTarget) -> Option<OperationOutcome> {
    let repository = &target.repository;
    if !repository.exists() {
        debug!(alias = %target.alias(), path = %target.path().display(), "skip: not cloned");
        return Some(OperationOutcome::skipped(SkipReason::NotCloned));
    }
    if !repository.has_vcs_marker() {
        debug!(alias = %target.alias(), path = %target.path().display(), "skip: no .git marker");
        return Some(OperationOutcome::skipped(SkipReason::NotRepository));
    }
    None
}

/// Skip discovered repositories.
pub(crate) fn require_listed(target: &RepoTarget) -> Option<OperationOutcome> {
    if target.repository.unlisted {
        debug!(alias = %target.alias(), "skip: unlisted");
        return Some(OperationOutcome::skipped(SkipReason::Unlisted));
    }
    None
}

pub(crate) fn scm_failure(error: ScmError) -> OperationOutcome {
    OperationOutcome::failed(error.short_reason())
}
