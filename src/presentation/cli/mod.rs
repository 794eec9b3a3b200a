pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;

use crate::application::services::dispatcher::DEFAULT_WORKERS;
use crate::application::use_cases::{
    CleanOperation, CloneOperation, ConvertOperation, DeleteOperation, PopOperation,
    PullOperation, RepositoryOperation, StashOperation, StatusOperation,
};
use crate::infrastructure::filesystem::RuntimePaths;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GITS_GIT_HASH"),
    ", built ",
    env!("GITS_BUILD_DATE"),
    ", ",
    env!("GITS_BUILD_TARGET"),
    ")"
);

/// Output format options for status command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    Text,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

/// gits - apply git operations to groups of repositories
#[derive(Parser, Debug)]
#[command(name = "gits")]
#[command(about = "Apply git operations to groups of repositories declared in a YAML file")]
#[command(version, long_version = LONG_VERSION)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Limit the command to one repository group
    #[arg(short = 'r', long, global = true, value_name = "GROUP")]
    pub repo_group: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Report what would be done without changing anything
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Number of repositories processed at once
    #[arg(short, long, global = true, default_value_t = DEFAULT_WORKERS)]
    pub jobs: usize,

    /// Configuration file (defaults to $XDG_CONFIG_HOME/gits/repository_locations.yml)
    #[arg(long, global = true, env = "GITS_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// git executable to run
    #[arg(long, global = true, env = "GITS_GIT", default_value = "git", value_name = "EXE")]
    pub git: String,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Defaults to `status`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Discard local changes and untracked files (reset --hard, clean -ffdx)
    Clean,

    /// Clone declared repositories that are not on disk yet
    Clone,

    /// Convert UTF-16 files to UTF-8 in place
    Convert {
        /// File extensions to convert
        #[arg(long = "ext", value_delimiter = ',', default_value = "sql")]
        extensions: Vec<String>,
    },

    /// Delete checkouts not marked do_not_delete, then empty group roots
    Delete,

    /// Check the environment and the configuration
    Doctor,

    /// List groups, and their repositories with --verbose
    List,

    /// Stash local changes if any, then pull
    Pull,

    /// Pop the latest stash
    Pop,

    /// Stash local changes
    Stash,

    /// Show working tree status
    Status {
        /// Output format (text, json, yaml)
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Write a commented configuration template
    Init {
        /// Force overwrite existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Write an explicit target_path for every declared repository
    Materialize,
}

/// Flags shared by every command, with paths already resolved.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub paths: RuntimePaths,
    pub repo_group: Option<String>,
    pub verbose: bool,
    pub dry_run: bool,
    pub jobs: usize,
    pub git: String,
}

/// Whether a command completed cleanly. Failures map to exit code 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failed,
}

impl CommandStatus {
    pub fn from_failed(failed: bool) -> Self {
        if failed {
            Self::Failed
        } else {
            Self::Success
        }
    }
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn from_cli(cli: Cli) -> Self {
        Self { cli }
    }

    pub async fn run(self) -> Result<()> {
        let use_color = !self.cli.no_color && atty::is(atty::Stream::Stdout);
        colored::control::set_override(use_color);

        match self.handle_command().await {
            Ok(CommandStatus::Success) => Ok(()),
            Ok(CommandStatus::Failed) => exit(1),
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    fn global_options(&self) -> Result<GlobalOptions> {
        Ok(GlobalOptions {
            paths: RuntimePaths::resolve(self.cli.config.clone())?,
            repo_group: self.cli.repo_group.clone(),
            verbose: self.cli.verbose,
            dry_run: self.cli.dry_run,
            jobs: self.cli.jobs,
            git: self.cli.git.clone(),
        })
    }

    async fn handle_command(&self) -> Result<CommandStatus> {
        let options = self.global_options()?;
        let command = self.cli.command.clone().unwrap_or(Commands::Status {
            output: OutputFormat::Text,
        });

        match command {
            Commands::Init { force } => commands::init::InitCommand::new(force).execute(&options),
            Commands::List => commands::list::ListCommand::new().execute(&options),
            Commands::Doctor => commands::doctor::DoctorCommand::new().execute(&options).await,
            Commands::Materialize => {
                commands::materialize::MaterializeCommand::new().execute(&options)
            }
            Commands::Status { output } => {
                self.handle_operation(&options, Arc::new(StatusOperation), output)
                    .await
            }
            Commands::Convert { extensions } => {
                let operation = Arc::new(ConvertOperation::new(extensions));
                self.handle_operation(&options, operation, OutputFormat::Text)
                    .await
            }
            Commands::Clean => self.handle_text_operation(&options, Arc::new(CleanOperation)).await,
            Commands::Clone => self.handle_text_operation(&options, Arc::new(CloneOperation)).await,
            Commands::Delete => self.handle_text_operation(&options, Arc::new(DeleteOperation)).await,
            Commands::Pull => self.handle_text_operation(&options, Arc::new(PullOperation)).await,
            Commands::Pop => self.handle_text_operation(&options, Arc::new(PopOperation)).await,
            Commands::Stash => self.handle_text_operation(&options, Arc::new(StashOperation)).await,
        }
    }

    async fn handle_text_operation(
        &self,
        options: &GlobalOptions,
        operation: Arc<dyn RepositoryOperation>,
    ) -> Result<CommandStatus> {
        self.handle_operation(options, operation, OutputFormat::Text)
            .await
    }

    async fn handle_operation(
        &self,
        options: &GlobalOptions,
        operation: Arc<dyn RepositoryOperation>,
        output: OutputFormat,
    ) -> Result<CommandStatus> {
        commands::run_operation::RunOperationCommand::new(operation, output)
            .execute(options)
            .await
    }
}
