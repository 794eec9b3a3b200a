use super::scm_interface::{CommandOutput, ScmError, ScmOperations};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Git implementation of [`ScmOperations`], shelling out to the `git` binary.
pub struct GitScm {
    git_executable: String,
}

impl Default for GitScm {
    fn default() -> Self {
        Self {
            git_executable: "git".to_string(),
        }
    }
}

impl GitScm {
    /// Create a new Git SCM instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new Git SCM instance with custom executable path
    pub fn with_executable(executable: impl Into<String>) -> Self {
        Self {
            git_executable: executable.into(),
        }
    }

    /// Execute a git command and check for success
    async fn execute_git_command_checked(&self, args: &[&str]) -> Result<CommandOutput, ScmError> {
        let command = format!("{} {}", self.git_executable, args.join(" "));
        debug!(command = %command, "running");

        let output = Command::new(&self.git_executable)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ScmError::executable_not_found(&self.git_executable),
                _ => ScmError::from(e),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            let exit_code = output.status.code().unwrap_or(-1);
            debug!(command = %command, exit_code, "failed");
            return Err(ScmError::command_failed(command, exit_code, stderr));
        }

        Ok(CommandOutput::new(stdout, stderr))
    }

    /// Run `git -C <repo> <args...>`
    async fn execute_in(&self, repo: &Path, args: &[&str]) -> Result<CommandOutput, ScmError> {
        let repo = repo.to_str().ok_or_else(|| ScmError::invalid_path(repo))?;
        let mut full = vec!["-C", repo];
        full.extend_from_slice(args);
        self.execute_git_command_checked(&full).await
    }
}

#[async_trait]
impl ScmOperations for GitScm {
    async fn version(&self) -> Result<String, ScmError> {
        let output = self.execute_git_command_checked(&["--version"]).await?;
        Ok(output.stdout.trim().to_string())
    }

    async fn clone_repository(&self, url: &str, dest: &Path) -> Result<CommandOutput, ScmError> {
        let dest = dest.to_str().ok_or_else(|| ScmError::invalid_path(dest))?;
        self.execute_git_command_checked(&["clone", url, dest]).await
    }

    async fn status_short(&self, repo: &Path) -> Result<CommandOutput, ScmError> {
        self.execute_in(repo, &["status", "--short"]).await
    }

    async fn status_porcelain(&self, repo: &Path) -> Result<CommandOutput, ScmError> {
        self.execute_in(repo, &["status", "--porcelain"]).await
    }

    async fn pull(&self, repo: &Path) -> Result<CommandOutput, ScmError> {
        self.execute_in(repo, &["pull"]).await
    }

    async fn stash(&self, repo: &Path) -> Result<CommandOutput, ScmError> {
        self.execute_in(repo, &["stash"]).await
    }

    async fn stash_list(&self, repo: &Path) -> Result<CommandOutput, ScmError> {
        self.execute_in(repo, &["stash", "list"]).await
    }

    async fn stash_pop(&self, repo: &Path) -> Result<CommandOutput, ScmError> {
        self.execute_in(repo, &["stash", "pop"]).await
    }

    async fn reset_hard(&self, repo: &Path) -> Result<CommandOutput, ScmError> {
        self.execute_in(repo, &["reset", "--hard"]).await
    }

    async fn clean_untracked(&self, repo: &Path) -> Result<CommandOutput, ScmError> {
        self.execute_in(repo, &["clean", "-ffdx"]).await
    }
}
