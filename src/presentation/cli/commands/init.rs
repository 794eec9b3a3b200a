use anyhow::Result;
use colored::Colorize;

use crate::infrastructure::filesystem::ConfigStore;
use crate::presentation::cli::{CommandStatus, GlobalOptions};

/// Write the configuration template at the resolved location
pub struct InitCommand {
    /// Force overwrite existing file
    pub force: bool,
}

impl InitCommand {
    pub fn new(force: bool) -> Self {
        Self { force }
    }

    /// Execute the init command
    pub fn execute(&self, options: &GlobalOptions) -> Result<CommandStatus> {
        let store = ConfigStore::new(&options.paths.config_file);

        if options.dry_run {
            println!(
                "{} (dry-run) would write configuration template to {}",
                "~".cyan(),
                store.path().display()
            );
            return Ok(CommandStatus::Success);
        }

        store.write_template(self.force)?;

        println!("{} Created configuration template", "✓".green().bold());
        println!("  Location: {}", store.path().display());
        println!();
        println!("Next steps:");
        println!("   1. Edit the file to declare your groups and repositories");
        println!("   2. Run 'gits clone' to clone them");
        println!("   3. Use 'gits status' to check their state");

        Ok(CommandStatus::Success)
    }
}
