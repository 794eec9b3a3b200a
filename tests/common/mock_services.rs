//! A recording stand-in for the `git` adapter.
//!
//! Every call is appended to a shared history as `"<command> <path>"`, so
//! tests can assert on what would have been run without a real git binary.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gits::infrastructure::scm::{CommandOutput, ScmError, ScmOperations};

#[derive(Default)]
struct Behaviour {
    dirty: HashSet<PathBuf>,
    failing: HashMap<(String, PathBuf), String>,
    pull_output: HashMap<PathBuf, String>,
    delay: Option<Duration>,
}

/// Records calls, optionally sleeps, tracks peak concurrency.
#[derive(Clone, Default)]
pub struct RecordingScm {
    calls: Arc<Mutex<Vec<String>>>,
    behaviour: Arc<Mutex<Behaviour>>,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl RecordingScm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command sleeps this long before answering.
    pub fn with_delay(self, delay: Duration) -> Self {
        self.behaviour.lock().unwrap().delay = Some(delay);
        self
    }

    /// `status --porcelain` reports local changes for this path.
    pub fn with_dirty(self, repo: impl Into<PathBuf>) -> Self {
        self.behaviour.lock().unwrap().dirty.insert(repo.into());
        self
    }

    /// `command` (e.g. `"stash pop"`) exits non-zero for this path.
    pub fn with_failure(self, command: &str, repo: impl Into<PathBuf>, stderr: &str) -> Self {
        self.behaviour
            .lock()
            .unwrap()
            .failing
            .insert((command.to_string(), repo.into()), stderr.to_string());
        self
    }

    pub fn with_pull_output(self, repo: impl Into<PathBuf>, stdout: &str) -> Self {
        self.behaviour
            .lock()
            .unwrap()
            .pull_output
            .insert(repo.into(), stdout.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, command: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(&format!("{} ", command)))
            .collect()
    }

    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    async fn run(&self, command: &str, repo: &Path, stdout: String) -> Result<CommandOutput, ScmError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{} {}", command, repo.display()));

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(current, Ordering::SeqCst);

        let (delay, failure) = {
            let behaviour = self.behaviour.lock().unwrap();
            (
                behaviour.delay,
                behaviour
                    .failing
                    .get(&(command.to_string(), repo.to_path_buf()))
                    .cloned(),
            )
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match failure {
            Some(stderr) => Err(ScmError::command_failed(format!("git {}", command), 1, stderr)),
            None => Ok(CommandOutput::new(stdout, "")),
        }
    }
}

#[async_trait]
impl ScmOperations for RecordingScm {
    async fn version(&self) -> Result<String, ScmError> {
        Ok("git version 2.43.0".to_string())
    }

    async fn clone_repository(&self, url: &str, dest: &Path) -> Result<CommandOutput, ScmError> {
        self.calls.lock().unwrap().push(format!("clone {} {}", url, dest.display()));
        std::fs::create_dir_all(dest.join(".git"))?;
        Ok(CommandOutput::new("", format!("Cloning into '{}'...", dest.display())))
    }

    async fn status_short(&self, repo: &Path) -> Result<CommandOutput, ScmError> {
        let dirty = self.behaviour.lock().unwrap().dirty.contains(repo);
        let stdout = if dirty { " M README.md\n" } else { "" };
        self.run("status --short", repo, stdout.to_string()).await
    }

    async fn status_porcelain(&self, repo: &Path) -> Result<CommandOutput, ScmError> {
        let dirty = self.behaviour.lock().unwrap().dirty.contains(repo);
        let stdout = if dirty { " M README.md\n" } else { "" };
        self.run("status --porcelain", repo, stdout.to_string()).await
    }

    async fn pull(&self, repo: &Path) -> Result<CommandOutput, ScmError> {
        let stdout = self
            .behaviour
            .lock()
            .unwrap()
            .pull_output
            .get(repo)
            .cloned()
            .unwrap_or_else(|| "Already up to date.\n".to_string());
        self.run("pull", repo, stdout).await
    }

    async fn stash(&self, repo: &Path) -> Result<CommandOutput, ScmError> {
        let dirty = self.behaviour.lock().unwrap().dirty.contains(repo);
        let stdout = if dirty {
            "Saved working directory and index state WIP on main: 0000000 init\n"
        } else {
            "No local changes to save\n"
        };
        self.run("stash", repo, stdout.to_string()).await
    }

    async fn stash_list(&self, repo: &Path) -> Result<CommandOutput, ScmError> {
        self.run("stash list", repo, String::new()).await
    }

    async fn stash_pop(&self, repo: &Path) -> Result<CommandOutput, ScmError> {
        self.run("stash pop", repo, "Dropped refs/stash@{0}\n".to_string())
            .await
    }

    async fn reset_hard(&self, repo: &Path) -> Result<CommandOutput, ScmError> {
        self.run("reset --hard", repo, "HEAD is now at 0000000 init\n".to_string())
            .await
    }

    async fn clean_untracked(&self, repo: &Path) -> Result<CommandOutput, ScmError> {
        self.run("clean -ffdx", repo, String::new()).await
    }
}
