use anyhow::Result;
use colored::Colorize;

use crate::infrastructure::filesystem::ConfigStore;
use crate::presentation::cli::{CommandStatus, GlobalOptions};

/// Rewrite the configuration so every declared repository has a `target_path`.
pub struct MaterializeCommand;

impl Default for MaterializeCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterializeCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, options: &GlobalOptions) -> Result<CommandStatus> {
        let store = ConfigStore::new(&options.paths.config_file);
        let added = store.materialize(
            &options.paths.home,
            options.repo_group.as_deref(),
            options.dry_run,
        )?;

        if added.is_empty() {
            println!("{} No changes made.", "ℹ".blue());
            return Ok(CommandStatus::Success);
        }

        for entry in &added {
            let prefix = if options.dry_run { "(dry-run) would set" } else { "set" };
            println!(
                "   {} {}/{}: {} target_path = {}",
                "✓".green(),
                entry.group,
                entry.alias,
                prefix,
                entry.target_path.display()
            );
        }
        if !options.dry_run {
            println!(
                "{} Updated {} repositories in {}",
                "✓".green().bold(),
                added.len(),
                store.path().display()
            );
        }
        Ok(CommandStatus::Success)
    }
}
