use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::warn;

use crate::domain::entities::{OperationOutcome, RepoTarget};

/// One repository's outcome as recorded by the [`Reporter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub group: String,
    pub alias: String,
    pub path: PathBuf,
    pub unlisted: bool,
    #[serde(flatten)]
    pub outcome: OperationOutcome,
}

impl ReportEntry {
    pub fn new(target: &RepoTarget, outcome: OperationOutcome) -> Self {
        Self {
            group: target.group.clone(),
            alias: target.alias().to_string(),
            path: target.path().to_path_buf(),
            unlisted: target.repository.unlisted,
            outcome,
        }
    }
}

/// Aggregate over every outcome of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub failures: usize,
    /// Whether any per-repository line was printed
    pub any_output: bool,
    /// Aliases that were changed (or deleted)
    pub affected: Vec<String>,
    pub entries: Vec<ReportEntry>,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.failures > 0
    }
}

/// Thread-safe accumulator shared by every dispatched unit of one run.
///
/// In capture mode lines are kept in memory instead of being printed;
/// warnings still reach stderr.
#[derive(Debug)]
pub struct Reporter {
    verbose: bool,
    capture: bool,
    entries: Mutex<Vec<ReportEntry>>,
    lines: Mutex<Vec<String>>,
    total: AtomicUsize,
    failures: AtomicUsize,
    any_output: AtomicBool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Reporter {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            capture: false,
            entries: Mutex::new(Vec::new()),
            lines: Mutex::new(Vec::new()),
            total: AtomicUsize::new(0),
            failures: AtomicUsize::new(0),
            any_output: AtomicBool::new(false),
        }
    }

    pub fn capturing(verbose: bool) -> Self {
        Self {
            capture: true,
            ..Self::new(verbose)
        }
    }

    /// Record a unit's outcome and print it if it is visible.
    pub fn record(&self, target: &RepoTarget, outcome: OperationOutcome, skips_visible: bool) {
        self.total.fetch_add(1, Ordering::SeqCst);
        if let OperationOutcome::Failed { reason } = &outcome {
            self.failures.fetch_add(1, Ordering::SeqCst);
            warn!(group = %target.group, alias = %target.alias(), reason = %reason, "operation failed");
        }

        if outcome.is_visible(self.verbose, skips_visible) {
            self.emit(self.render(target, &outcome));
            self.any_output.store(true, Ordering::SeqCst);
        }

        lock(&self.entries).push(ReportEntry::new(target, outcome));
    }

    /// Group header, printed from the submission loop.
    pub fn group_header(&self, group: &str) {
        self.emit(format!("{} {}", "▸".blue().bold(), group.bold()));
    }

    /// A line that does not count as per-repository output.
    pub fn message(&self, line: impl Into<String>) {
        self.emit(line.into());
    }

    /// Always reaches stderr, capture mode included; captured runs also keep it.
    pub fn warning(&self, line: impl Into<String>) {
        let line = line.into();
        warn!("{}", line);
        eprintln!("{} {}", "warning:".yellow().bold(), line);
        if self.capture {
            lock(&self.lines).push(format!("warning: {}", line));
        }
    }

    /// Close the run. Prints `quiet_summary` if nothing else was printed.
    pub fn finish(&self, quiet_summary: Option<&str>) -> RunSummary {
        let any_output = self.any_output.load(Ordering::SeqCst);
        if !any_output {
            if let Some(summary) = quiet_summary {
                self.emit(format!("{} {}", "ℹ".blue(), summary));
            }
        }

        let entries = lock(&self.entries).clone();
        let affected = entries
            .iter()
            .filter(|e| e.outcome.is_change())
            .map(|e| e.alias.clone())
            .collect();

        RunSummary {
            total: self.total.load(Ordering::SeqCst),
            failures: self.failures.load(Ordering::SeqCst),
            any_output,
            affected,
            entries,
        }
    }

    /// Outcomes recorded so far.
    pub fn entries(&self) -> Vec<ReportEntry> {
        lock(&self.entries).clone()
    }

    /// Lines kept in capture mode.
    pub fn lines(&self) -> Vec<String> {
        lock(&self.lines).clone()
    }

    fn emit(&self, line: String) {
        if self.capture {
            lock(&self.lines).push(line);
        } else {
            println!("{}", line);
        }
    }

    fn render(&self, target: &RepoTarget, outcome: &OperationOutcome) -> String {
        let alias = target.alias();
        let mut line = match outcome {
            OperationOutcome::Skipped { reason } => {
                format!("   {} {}: skipped ({})", "-".dimmed(), alias, reason)
            }
            OperationOutcome::DryRun { action } => {
                format!("   {} (dry-run) {}: {}", "~".cyan(), alias, action)
            }
            OperationOutcome::Succeeded {
                summary, changed, ..
            } => {
                let icon = if *changed { "✓".green() } else { "·".dimmed() };
                format!("   {} {}: {}", icon, alias, summary)
            }
            OperationOutcome::Failed { reason } => {
                format!("   {} {}: failed: {}", "✗".red().bold(), alias, reason)
            }
        };

        if self.verbose {
            line.push_str(&format!(" -> {}", target.path().display()));
            if let OperationOutcome::Succeeded {
                detail: Some(detail),
                ..
            } = outcome
            {
                for detail_line in detail.lines() {
                    line.push_str(&format!("\n      {}", detail_line));
                }
            }
        }
        line
    }
}
