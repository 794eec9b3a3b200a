use serde::Serialize;
use std::fmt;

/// Why an operation did not touch a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Target path does not exist
    NotCloned,
    /// Target path already exists (clone)
    Exists,
    /// `do_not_delete` is set
    Protected,
    /// Discovered on disk, not declared
    Unlisted,
    /// Directory exists but carries no `.git` marker
    NotRepository,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NotCloned => "not cloned",
            Self::Exists => "already exists",
            Self::Protected => "do_not_delete = true",
            Self::Unlisted => "unlisted",
            Self::NotRepository => "not a git repository",
        };
        f.write_str(text)
    }
}

/// Result of applying one operation to one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OperationOutcome {
    Skipped {
        reason: SkipReason,
    },
    DryRun {
        action: String,
    },
    Succeeded {
        summary: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
        /// False when the operation found nothing to do
        changed: bool,
    },
    Failed {
        reason: String,
    },
}

impl OperationOutcome {
    pub fn skipped(reason: SkipReason) -> Self {
        Self::Skipped { reason }
    }

    pub fn dry_run(action: impl Into<String>) -> Self {
        Self::DryRun {
            action: action.into(),
        }
    }

    pub fn succeeded(summary: impl Into<String>, changed: bool) -> Self {
        Self::Succeeded {
            summary: summary.into(),
            detail: None,
            changed,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    /// Attach command output; blank output is dropped.
    pub fn with_detail(self, text: impl Into<String>) -> Self {
        match self {
            Self::Succeeded {
                summary, changed, ..
            } => {
                let text = text.into();
                let detail = if text.trim().is_empty() {
                    None
                } else {
                    Some(text.trim_end().to_string())
                };
                Self::Succeeded {
                    summary,
                    detail,
                    changed,
                }
            }
            other => other,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Skipped { reason } => Some(*reason),
            _ => None,
        }
    }

    /// Whether the repository was actually changed.
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Succeeded { changed: true, .. })
    }

    /// Whether this outcome is printed.
    ///
    /// Verbose shows everything. Otherwise failures, dry-run reports and
    /// changes are shown, and skips only when the operation asks for it.
    pub fn is_visible(&self, verbose: bool, skips_visible: bool) -> bool {
        if verbose {
            return true;
        }
        match self {
            Self::Failed { .. } | Self::DryRun { .. } => true,
            Self::Succeeded { changed, .. } => *changed,
            Self::Skipped { .. } => skips_visible,
        }
    }
}
