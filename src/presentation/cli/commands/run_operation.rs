use anyhow::{Context, Result};
use std::sync::Arc;

use crate::application::services::{ConfigResolver, Dispatcher, Reporter};
use crate::application::use_cases::{BulkOperationUseCase, OperationContext, RepositoryOperation};
use crate::domain::entities::Inventory;
use crate::infrastructure::filesystem::ConfigStore;
use crate::infrastructure::scm::{GitScm, ScmOperations};
use crate::presentation::cli::{CommandStatus, GlobalOptions, OutputFormat};

/// Load the configuration and resolve it against the home directory.
pub fn load_inventory(options: &GlobalOptions) -> Result<Inventory> {
    let store = ConfigStore::new(&options.paths.config_file);
    let inventory = ConfigResolver::new(&options.paths.home).resolve_file(&store)?;
    Ok(inventory)
}

/// Run one repository operation over the selected groups.
pub struct RunOperationCommand {
    operation: Arc<dyn RepositoryOperation>,
    output: OutputFormat,
}

impl RunOperationCommand {
    pub fn new(operation: Arc<dyn RepositoryOperation>, output: OutputFormat) -> Self {
        Self { operation, output }
    }

    pub async fn execute(&self, options: &GlobalOptions) -> Result<CommandStatus> {
        let inventory = load_inventory(options)?;

        let reporter = Arc::new(match self.output {
            OutputFormat::Text => Reporter::new(options.verbose),
            OutputFormat::Json | OutputFormat::Yaml => Reporter::capturing(options.verbose),
        });
        let scm: Arc<dyn ScmOperations> = Arc::new(GitScm::with_executable(&options.git));
        let context = OperationContext::new(scm)
            .with_dry_run(options.dry_run)
            .with_verbose(options.verbose);

        let use_case =
            BulkOperationUseCase::new(Dispatcher::new(options.jobs), context, Arc::clone(&reporter));
        let summary = use_case
            .execute(&inventory, options.repo_group.as_deref(), Arc::clone(&self.operation))
            .await?;

        match self.output {
            OutputFormat::Text => {}
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&summary.entries)
                    .context("Failed to serialize report")?;
                println!("{}", json);
            }
            OutputFormat::Yaml => {
                let yaml = serde_yaml::to_string(&summary.entries)
                    .context("Failed to serialize report")?;
                print!("{}", yaml);
            }
        }

        Ok(CommandStatus::from_failed(summary.has_failures()))
    }
}
