//! Bulk operations run through the dispatcher against a recording git fake.

mod common;

use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::{Duration, Instant};

use common::mock_services::RecordingScm;
use common::test_fixtures::{tools_config, HomeFixture};
use gits::application::services::{Dispatcher, Reporter, RunSummary};
use gits::application::use_cases::{
    BulkOperationUseCase, CleanOperation, CloneOperation, ConvertOperation, DeleteOperation,
    OperationContext, PopOperation, PullOperation, RepositoryOperation, StashOperation,
    StatusOperation,
};
use gits::domain::entities::{Inventory, OperationOutcome, SkipReason};

struct Run {
    summary: RunSummary,
    lines: Vec<String>,
}

async fn run(
    inventory: &Inventory,
    scm: &RecordingScm,
    operation: Arc<dyn RepositoryOperation>,
    dry_run: bool,
    width: usize,
) -> Run {
    colored::control::set_override(false);
    let reporter = Arc::new(Reporter::capturing(false));
    let context = OperationContext::new(Arc::new(scm.clone())).with_dry_run(dry_run);
    let summary = BulkOperationUseCase::new(Dispatcher::new(width), context, Arc::clone(&reporter))
        .execute(inventory, None, operation)
        .await
        .unwrap();
    Run {
        summary,
        lines: reporter.lines(),
    }
}

fn outcome_of<'a>(summary: &'a RunSummary, alias: &str) -> &'a OperationOutcome {
    &summary
        .entries
        .iter()
        .find(|e| e.alias == alias)
        .unwrap_or_else(|| panic!("no entry for {}", alias))
        .outcome
}

#[tokio::test]
async fn test_delete_skips_protected_and_keeps_non_empty_root() {
    let fixture = HomeFixture::new();
    fixture.write_config(
        "tools:\n  - root_dir: ~/tools\n  - repositories:\n      - {alias: keep, url: u, do_not_delete: true}\n      - {alias: drop, url: u}\n",
    );
    let keep = fixture.checkout("tools/keep");
    let drop = fixture.checkout("tools/drop");
    let scm = RecordingScm::new();

    let result = run(&fixture.inventory(), &scm, Arc::new(DeleteOperation), false, 4).await;

    assert_path_absent!(drop);
    assert_dir_exists!(keep);
    assert_dir_exists!(fixture.home().join("tools"));
    assert_eq!(
        outcome_of(&result.summary, "keep").skip_reason(),
        Some(SkipReason::Protected)
    );
    assert_eq!(result.summary.affected, vec!["drop".to_string()]);
    assert_line_contains!(result.lines, "is not empty");
    assert!(!result.summary.has_failures());
    assert!(scm.calls().is_empty());
}

#[tokio::test]
async fn test_delete_removes_emptied_group_root() {
    let fixture = HomeFixture::new();
    fixture.write_config(&tools_config(&["a", "b"]));
    fixture.checkout("tools/a");
    fixture.checkout("tools/b");

    let result = run(&fixture.inventory(), &RecordingScm::new(), Arc::new(DeleteOperation), false, 4).await;

    assert_path_absent!(fixture.home().join("tools"));
    assert_eq!(result.summary.affected.len(), 2);
    assert_line_contains!(result.lines, "removed empty group root");
}

#[tokio::test]
async fn test_delete_dry_run_predicts_group_root_removal() {
    let fixture = HomeFixture::new();
    fixture.write_config(&tools_config(&["a", "b"]));
    let a = fixture.checkout("tools/a");
    let b = fixture.checkout("tools/b");

    let result = run(&fixture.inventory(), &RecordingScm::new(), Arc::new(DeleteOperation), true, 4).await;

    assert_dir_exists!(a);
    assert_dir_exists!(b);
    assert_line_contains!(result.lines, "would remove empty group root tools");
    assert!(!result.lines.iter().any(|line| line.contains("is not empty")));
}

#[tokio::test]
async fn test_dry_run_runs_no_commands_and_changes_nothing() {
    let fixture = HomeFixture::new();
    fixture.write_config(&tools_config(&["present", "missing"]));
    let present = fixture.checkout("tools/present");
    std::fs::write(present.join("a.sql"), [0xFF, 0xFE, b'x', 0x00]).unwrap();
    let inventory = fixture.inventory();

    let operations: Vec<Arc<dyn RepositoryOperation>> = vec![
        Arc::new(CloneOperation),
        Arc::new(PullOperation),
        Arc::new(CleanOperation),
        Arc::new(DeleteOperation),
        Arc::new(StatusOperation),
        Arc::new(StashOperation),
        Arc::new(PopOperation),
        Arc::new(ConvertOperation::default()),
    ];

    for operation in operations {
        let scm = RecordingScm::new().with_dirty(&present);
        let result = run(&inventory, &scm, Arc::clone(&operation), true, 4).await;

        assert!(
            scm.calls().is_empty(),
            "{} ran commands in dry-run: {:?}",
            operation.name(),
            scm.calls()
        );
        assert!(!result.summary.has_failures(), "{} failed", operation.name());
        assert_dir_exists!(present);
        assert_path_absent!(fixture.home().join("tools/missing"));
        assert_eq!(
            std::fs::read(present.join("a.sql")).unwrap(),
            vec![0xFF, 0xFE, b'x', 0x00]
        );
        assert_eq!(std::fs::read_to_string(present.join("README.md")).unwrap(), "# readme\n");
    }
}

#[tokio::test]
async fn test_pull_dry_run_on_dirty_repository() {
    let fixture = HomeFixture::new();
    fixture.write_config(&tools_config(&["foo"]));
    let foo = fixture.checkout("tools/foo");
    std::fs::write(foo.join("README.md"), "local edit\n").unwrap();
    let scm = RecordingScm::new().with_dirty(&foo);

    let result = run(&fixture.inventory(), &scm, Arc::new(PullOperation), true, 4).await;

    assert_eq!(
        outcome_of(&result.summary, "foo"),
        &OperationOutcome::dry_run("would stash and pull")
    );
    assert!(scm.calls().is_empty());
    assert_eq!(std::fs::read_to_string(foo.join("README.md")).unwrap(), "local edit\n");
    assert_line_contains!(result.lines, "(dry-run) foo: would stash and pull");
}

#[tokio::test]
async fn test_pull_stashes_only_dirty_repositories() {
    let fixture = HomeFixture::new();
    fixture.write_config(&tools_config(&["dirty", "clean"]));
    let dirty = fixture.checkout("tools/dirty");
    let clean = fixture.checkout("tools/clean");
    let scm = RecordingScm::new()
        .with_dirty(&dirty)
        .with_pull_output(&clean, "Updating 1111111..2222222\nFast-forward\n");

    let result = run(&fixture.inventory(), &scm, Arc::new(PullOperation), false, 4).await;

    assert_eq!(scm.calls_for("stash"), vec![format!("stash {}", dirty.display())]);
    assert_eq!(scm.calls_for("pull").len(), 2);
    assert_eq!(
        outcome_of(&result.summary, "clean"),
        &OperationOutcome::succeeded("pulled", true)
            .with_detail("Updating 1111111..2222222\nFast-forward")
    );
}

#[tokio::test]
async fn test_clone_when_everything_is_present() {
    let fixture = HomeFixture::new();
    fixture.write_config(&tools_config(&["a", "b", "c"]));
    for alias in ["a", "b", "c"] {
        fixture.checkout(&format!("tools/{}", alias));
    }
    let scm = RecordingScm::new();

    let result = run(&fixture.inventory(), &scm, Arc::new(CloneOperation), false, 4).await;

    assert!(scm.calls().is_empty());
    assert_eq!(result.lines, vec!["ℹ All repositories are already cloned.".to_string()]);
}

#[tokio::test]
async fn test_clone_missing_repositories_and_skip_unlisted() {
    let fixture = HomeFixture::new();
    fixture.write_config(&tools_config(&["new"]));
    fixture.checkout("tools/stray");
    let scm = RecordingScm::new();

    let result = run(&fixture.inventory(), &scm, Arc::new(CloneOperation), false, 4).await;

    assert_eq!(
        scm.calls(),
        vec![format!(
            "clone https://example.com/new.git {}",
            fixture.home().join("tools/new").display()
        )]
    );
    assert_eq!(
        outcome_of(&result.summary, "stray").skip_reason(),
        Some(SkipReason::Unlisted)
    );
    assert_dir_exists!(fixture.home().join("tools/new"));
}

#[tokio::test]
async fn test_failures_are_isolated() {
    let fixture = HomeFixture::new();
    fixture.write_config(&tools_config(&["a", "b", "c"]));
    fixture.checkout("tools/a");
    let b = fixture.checkout("tools/b");
    fixture.checkout("tools/c");
    let scm = RecordingScm::new().with_failure("stash pop", &b, "No stash entries found.");

    let result = run(&fixture.inventory(), &scm, Arc::new(PopOperation), false, 2).await;

    assert_eq!(result.summary.total, 3);
    assert_eq!(result.summary.failures, 1);
    assert!(outcome_of(&result.summary, "b").is_failure());
    assert!(!outcome_of(&result.summary, "a").is_failure());
    assert!(!outcome_of(&result.summary, "c").is_failure());
    assert_line_contains!(result.lines, "b: failed");
}

#[tokio::test]
async fn test_workers_are_bounded_and_run_concurrently() {
    let fixture = HomeFixture::new();
    let aliases: Vec<String> = (0..8).map(|i| format!("repo{}", i)).collect();
    let refs: Vec<&str> = aliases.iter().map(String::as_str).collect();
    fixture.write_config(&tools_config(&refs));
    for alias in &aliases {
        fixture.checkout(&format!("tools/{}", alias));
    }
    let scm = RecordingScm::new().with_delay(Duration::from_millis(150));

    let started = Instant::now();
    let result = run(&fixture.inventory(), &scm, Arc::new(StatusOperation), false, 4).await;
    let elapsed = started.elapsed();

    assert_eq!(result.summary.total, 8);
    assert!(scm.peak_concurrency() <= 4, "peak {}", scm.peak_concurrency());
    assert!(scm.peak_concurrency() > 1);
    assert!(elapsed < Duration::from_millis(900), "took {:?}", elapsed);
}

#[tokio::test]
async fn test_status_reports_missing_checkouts() {
    let fixture = HomeFixture::new();
    fixture.write_config(&tools_config(&["here", "gone"]));
    fixture.checkout("tools/here");
    fixture.plain_dir("tools/plain");

    let result = run(&fixture.inventory(), &RecordingScm::new(), Arc::new(StatusOperation), false, 4).await;

    assert_eq!(
        outcome_of(&result.summary, "gone").skip_reason(),
        Some(SkipReason::NotCloned)
    );
    assert_eq!(
        outcome_of(&result.summary, "plain").skip_reason(),
        Some(SkipReason::NotRepository)
    );
    assert_line_contains!(result.lines, "gone: skipped (not cloned)");
    assert!(!result.summary.has_failures());
}
