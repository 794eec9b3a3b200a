use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;

use crate::application::use_cases::doctor::{CheckStatus, DoctorReport, DoctorUseCase};
use crate::domain::entities::PathSource;
use crate::infrastructure::scm::GitScm;
use crate::presentation::cli::{CommandStatus, GlobalOptions};

/// Run environment and configuration checks
pub struct DoctorCommand;

impl Default for DoctorCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl DoctorCommand {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(&self, options: &GlobalOptions) -> Result<CommandStatus> {
        println!("{} Running diagnostics", "::".blue().bold());

        let scm = Arc::new(GitScm::with_executable(&options.git));
        let report = DoctorUseCase::new(scm, options.paths.clone())
            .execute(options.repo_group.as_deref())
            .await;

        for line in render(&report) {
            println!("{}", line);
        }
        println!("{} Diagnostics complete", "::".blue().bold());

        Ok(CommandStatus::from_failed(report.has_failures()))
    }
}

fn describe(source: PathSource) -> &'static str {
    match source {
        PathSource::Explicit => "explicit target_path",
        PathSource::RootDir => "derived from root_dir",
        PathSource::HomeDefault => "derived from home",
        PathSource::Discovered => "discovered on disk",
    }
}

fn render(report: &DoctorReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .checks
        .iter()
        .map(|check| {
            let icon = match check.status {
                CheckStatus::Ok => "✓".green(),
                CheckStatus::Warn => "⚠".yellow(),
                CheckStatus::Fail => "✗".red(),
            };
            format!("   {} {}", icon, check.message)
        })
        .collect();

    for repository in &report.repositories {
        let parent = if repository.parent_exists {
            "parent exists".normal()
        } else {
            "parent missing".yellow()
        };
        lines.push(format!(
            "   • {}/{}: {} ({}) {}",
            repository.group,
            repository.alias,
            repository.path.display(),
            describe(repository.path_source),
            parent
        ));
    }
    lines
}
