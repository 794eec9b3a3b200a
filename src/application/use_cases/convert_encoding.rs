use async_trait::async_trait;

use super::operation::{OperationContext, RepositoryOperation};
use crate::domain::entities::{OperationOutcome, RepoTarget, SkipReason};
use crate::infrastructure::filesystem::utf16;

pub const DEFAULT_EXTENSIONS: &[&str] = &["sql"];

/// Rewrite UTF-16 files with selected extensions as UTF-8, in place.
#[derive(Debug, Clone)]
pub struct ConvertOperation {
    extensions: Vec<String>,
}

impl Default for ConvertOperation {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect())
    }
}

impl ConvertOperation {
    /// Extensions are matched case-insensitively; a leading dot is ignored.
    pub fn new(extensions: Vec<String>) -> Self {
        let extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();
        Self { extensions }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

#[async_trait]
impl RepositoryOperation for ConvertOperation {
    fn name(&self) -> &'static str {
        "convert"
    }

    fn quiet_summary(&self) -> &'static str {
        "No files needed conversion."
    }

    async fn apply(&self, target: &RepoTarget, ctx: &OperationContext) -> OperationOutcome {
        if !target.repository.exists() {
            return OperationOutcome::skipped(SkipReason::NotCloned);
        }

        let root = target.path().to_path_buf();
        let extensions = self.extensions.clone();
        let dry_run = ctx.dry_run;
        let report = match tokio::task::spawn_blocking(move || {
            utf16::convert_tree(&root, &extensions, dry_run)
        })
        .await
        {
            Ok(Ok(report)) => report,
            Ok(Err(e)) => return OperationOutcome::failed(format!("conversion failed: {}", e)),
            Err(e) => return OperationOutcome::failed(format!("conversion task failed: {}", e)),
        };

        let relative = |path: &std::path::Path| {
            path.strip_prefix(target.path())
                .unwrap_or(path)
                .display()
                .to_string()
        };
        let mut detail: Vec<String> = report.converted.iter().map(|p| relative(p.as_path())).collect();
        detail.extend(
            report
                .undecodable
                .iter()
                .map(|p| format!("{} (not valid UTF-16, left untouched)", relative(p.as_path()))),
        );

        let count = report.converted.len();
        if dry_run && count > 0 {
            return OperationOutcome::dry_run(format!(
                "would convert {} file(s): {}",
                count,
                report.converted.iter().map(|p| relative(p.as_path())).collect::<Vec<_>>().join(", ")
            ));
        }
        let summary = match count {
            0 => "nothing to convert".to_string(),
            1 => "converted 1 file".to_string(),
            n => format!("converted {} files", n),
        };
        OperationOutcome::succeeded(summary, count > 0).with_detail(detail.join("\n"))
    }
}
