use async_trait::async_trait;
use std::path::Path;

/// Captured output of one successful version-control command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Stdout followed by stderr, trimmed, for verbose echo.
    pub fn combined(&self) -> String {
        let stdout = self.stdout.trim_end();
        let stderr = self.stderr.trim_end();
        match (stdout.is_empty(), stderr.is_empty()) {
            (true, true) => String::new(),
            (false, true) => stdout.to_string(),
            (true, false) => stderr.to_string(),
            (false, false) => format!("{}\n{}", stdout, stderr),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stdout.trim().is_empty() && self.stderr.trim().is_empty()
    }
}

/// The version-control commands the operations rely on.
///
/// Every call runs to completion; there is no timeout.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScmOperations: Send + Sync {
    /// Report the tool version (`--version`)
    async fn version(&self) -> Result<String, ScmError>;

    /// `clone <url> <dest>`
    async fn clone_repository(&self, url: &str, dest: &Path) -> Result<CommandOutput, ScmError>;

    /// `status --short`
    async fn status_short(&self, repo: &Path) -> Result<CommandOutput, ScmError>;

    /// `status --porcelain`, empty output means a clean tree
    async fn status_porcelain(&self, repo: &Path) -> Result<CommandOutput, ScmError>;

    /// `pull`
    async fn pull(&self, repo: &Path) -> Result<CommandOutput, ScmError>;

    /// `stash`
    async fn stash(&self, repo: &Path) -> Result<CommandOutput, ScmError>;

    /// `stash list`
    async fn stash_list(&self, repo: &Path) -> Result<CommandOutput, ScmError>;

    /// `stash pop`
    async fn stash_pop(&self, repo: &Path) -> Result<CommandOutput, ScmError>;

    /// `reset --hard`
    async fn reset_hard(&self, repo: &Path) -> Result<CommandOutput, ScmError>;

    /// `clean -ffdx`
    async fn clean_untracked(&self, repo: &Path) -> Result<CommandOutput, ScmError>;
}

/// Errors that can occur while running the version-control tool
#[derive(Debug, thiserror::Error)]
pub enum ScmError {
    #[error("SCM executable not found: {executable}")]
    ExecutableNotFound { executable: String },

    #[error("Command '{command}' failed with exit code {exit_code}: {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl ScmError {
    pub fn executable_not_found(executable: impl Into<String>) -> Self {
        Self::ExecutableNotFound {
            executable: executable.into(),
        }
    }

    pub fn command_failed(
        command: impl Into<String>,
        exit_code: i32,
        stderr: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            command: command.into(),
            exit_code,
            stderr: stderr.into(),
        }
    }

    pub fn invalid_path(path: &Path) -> Self {
        Self::InvalidPath {
            path: path.display().to_string(),
        }
    }

    /// One-line description used in per-repository failure reports.
    pub fn short_reason(&self) -> String {
        match self {
            Self::CommandFailed {
                command,
                exit_code,
                stderr,
            } => {
                let first_line = stderr.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
                if first_line.is_empty() {
                    format!("{} exited with {}", command, exit_code)
                } else {
                    format!("{} exited with {}: {}", command, exit_code, first_line.trim())
                }
            }
            other => other.to_string(),
        }
    }
}
