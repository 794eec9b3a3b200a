use anyhow::Result;
use colored::Colorize;

use super::run_operation::load_inventory;
use crate::application::use_cases::bulk_operation::NOTHING_CONFIGURED;
use crate::application::use_cases::list_groups::{list_groups, GroupListing};
use crate::presentation::cli::{CommandStatus, GlobalOptions};

/// Print groups, and with --verbose every repository with its markers.
pub struct ListCommand;

impl Default for ListCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ListCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, options: &GlobalOptions) -> Result<CommandStatus> {
        let inventory = load_inventory(options)?;
        let filter = options.repo_group.as_deref();

        if let Some(group) = filter {
            if !inventory.has_group(group) {
                eprintln!(
                    "{} repository group '{}' is not configured",
                    "warning:".yellow().bold(),
                    group
                );
                return Ok(CommandStatus::Success);
            }
        }

        let listing = list_groups(&inventory, filter);
        if listing.is_empty() {
            println!("{}", NOTHING_CONFIGURED);
        }
        for line in render(&listing, options.verbose) {
            println!("{}", line);
        }
        Ok(CommandStatus::Success)
    }
}

pub fn render(listing: &[GroupListing], verbose: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for group in listing {
        if verbose {
            lines.push(format!(
                "{} {} ({})",
                "▸".blue().bold(),
                group.name.bold(),
                group.root.display()
            ));
        } else {
            lines.push(format!("{} {}", "▸".blue().bold(), group.name.bold()));
            continue;
        }

        for repository in &group.repositories {
            let mut markers = Vec::new();
            if repository.unlisted {
                markers.push("(unlisted)".yellow().to_string());
            }
            if repository.do_not_delete {
                markers.push("(do_not_delete)".cyan().to_string());
            }
            let markers = if markers.is_empty() {
                String::new()
            } else {
                format!(" {}", markers.join(" "))
            };
            lines.push(format!(
                "   • {}{} -> {}",
                repository.alias,
                markers,
                repository.path.display()
            ));
        }
    }
    lines
}
