use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::config_resolver::ConfigResolver;
use crate::domain::entities::{Inventory, PathSource};
use crate::infrastructure::filesystem::{ConfigStore, RuntimePaths};
use crate::infrastructure::scm::ScmOperations;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Warn,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Check {
    pub status: CheckStatus,
    pub message: String,
}

impl Check {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Ok,
            message: message.into(),
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Warn,
            message: message.into(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Fail,
            message: message.into(),
        }
    }
}

/// How one repository's location was derived, and whether its parent exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryDiagnosis {
    pub group: String,
    pub alias: String,
    pub path: PathBuf,
    pub path_source: PathSource,
    pub parent_exists: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DoctorReport {
    pub checks: Vec<Check>,
    pub repositories: Vec<RepositoryDiagnosis>,
}

impl DoctorReport {
    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| c.status == CheckStatus::Fail)
    }
}

/// Environment and configuration diagnostics.
pub struct DoctorUseCase {
    scm: Arc<dyn ScmOperations>,
    paths: RuntimePaths,
}

impl DoctorUseCase {
    pub fn new(scm: Arc<dyn ScmOperations>, paths: RuntimePaths) -> Self {
        Self { scm, paths }
    }

    /// Never fails: every problem becomes a failed check.
    pub async fn execute(&self, group_filter: Option<&str>) -> DoctorReport {
        let mut report = DoctorReport::default();

        match self.scm.version().await {
            Ok(version) => report.checks.push(Check::ok(format!("git available: {}", version))),
            Err(e) => report.checks.push(Check::fail(format!("git not usable: {}", e))),
        }

        let store = ConfigStore::new(&self.paths.config_file);
        if !store.exists() {
            report.checks.push(Check::fail(format!(
                "configuration file missing: {}",
                store.path().display()
            )));
            return report;
        }
        report
            .checks
            .push(Check::ok(format!("configuration file found: {}", store.path().display())));

        let inventory = match ConfigResolver::new(&self.paths.home).resolve_file(&store) {
            Ok(inventory) => inventory,
            Err(e) => {
                report
                    .checks
                    .push(Check::fail(format!("configuration cannot be loaded: {}", e)));
                return report;
            }
        };

        if let Some(group) = group_filter {
            if !inventory.has_group(group) {
                report
                    .checks
                    .push(Check::warn(format!("repository group '{}' is not configured", group)));
            }
        }

        let targets = inventory.filtered(group_filter);
        report.checks.push(Check::ok(format!(
            "{} repositories in {} groups",
            targets.len(),
            inventory.selected_groups(group_filter).count()
        )));
        report.repositories = diagnose(&inventory, group_filter);
        report
    }
}

fn diagnose(inventory: &Inventory, group_filter: Option<&str>) -> Vec<RepositoryDiagnosis> {
    inventory
        .filtered(group_filter)
        .into_iter()
        .map(|target| RepositoryDiagnosis {
            parent_exists: target.path().parent().map_or(false, |p| p.is_dir()),
            group: target.group.clone(),
            alias: target.alias().to_string(),
            path: target.path().to_path_buf(),
            path_source: target.repository.path_source,
        })
        .collect()
}
