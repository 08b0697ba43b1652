// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use zero_core::{ScanId, ScanStatus, ScannerName, SystemClock, Target};
use zero_profiles::ExecutionRequest;
use zero_scanners::{EmptySharedArtifacts, FakeOutcome, FakeScanner};

use super::*;
use crate::planner::plan;
use crate::registry::ScannerRegistry;

struct Harness {
    dir: tempfile::TempDir,
}

impl Harness {
    fn new() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    fn config(&self, request: ExecutionRequest) -> RunConfig {
        RunConfig {
            scan_id: ScanId::new(),
            target: Target::new("acme", "widgets"),
            profile: "full".to_string(),
            request,
            working_tree: self.dir.path().join("repo"),
            artifact_dir: self.dir.path().join("analysis"),
            manifest_path: self.dir.path().join("analysis").join("manifest.json"),
            shared_artifacts: Arc::new(EmptySharedArtifacts),
        }
    }

    fn artifact_path(&self, scanner: &str) -> std::path::PathBuf {
        self.dir.path().join("analysis").join(format!("{scanner}.json"))
    }
}

fn scheduler(registry: Arc<FrozenRegistry>) -> RunScheduler<SystemClock> {
    RunScheduler::new(registry, SystemClock)
}

#[tokio::test]
async fn single_scanner_with_no_deps_completes_and_writes_its_artifact() {
    let harness = Harness::new();
    let mut registry = ScannerRegistry::new();
    registry.register(Arc::new(FakeScanner::new("sbom"))).unwrap();
    let frozen = Arc::new(registry.freeze().unwrap());
    let requested = [ScannerName::new("sbom")].into_iter().collect();
    let run_plan = plan(&frozen, &requested).unwrap();

    let (tx, _rx) = broadcast::channel(16);
    let report = scheduler(frozen)
        .run(harness.config(ExecutionRequest::new()), &run_plan, tx, CancellationToken::new())
        .await
        .unwrap();

    assert!(!report.any_failed());
    assert_eq!(report.manifest.scanners["sbom"].status, ScanStatus::Complete);
    assert!(harness.artifact_path("sbom").exists());
}

#[tokio::test]
async fn linear_chain_runs_every_scanner_to_completion() {
    let harness = Harness::new();
    let mut registry = ScannerRegistry::new();
    registry.register(Arc::new(FakeScanner::new("a"))).unwrap();
    registry.register(Arc::new(FakeScanner::new("b").depends_on(["a"]))).unwrap();
    registry.register(Arc::new(FakeScanner::new("c").depends_on(["b"]))).unwrap();
    let frozen = Arc::new(registry.freeze().unwrap());
    let requested = [ScannerName::new("c")].into_iter().collect();
    let run_plan = plan(&frozen, &requested).unwrap();

    let (tx, _rx) = broadcast::channel(16);
    let report = scheduler(frozen)
        .run(harness.config(ExecutionRequest::new()), &run_plan, tx, CancellationToken::new())
        .await
        .unwrap();

    assert!(!report.any_failed());
    for name in ["a", "b", "c"] {
        assert_eq!(report.manifest.scanners[name].status, ScanStatus::Complete);
    }
}

#[tokio::test]
async fn bounded_parallelism_serializes_a_wave_at_the_configured_cap() {
    let harness = Harness::new();
    let mut registry = ScannerRegistry::new();
    registry.register(Arc::new(FakeScanner::new("gitleaks").delay(Duration::from_millis(80)))).unwrap();
    registry.register(Arc::new(FakeScanner::new("semgrep").delay(Duration::from_millis(80)))).unwrap();
    let frozen = Arc::new(registry.freeze().unwrap());
    let requested = [ScannerName::new("gitleaks"), ScannerName::new("semgrep")].into_iter().collect();
    let run_plan = plan(&frozen, &requested).unwrap();

    let (tx, _rx) = broadcast::channel(16);
    let started = Instant::now();
    let report = scheduler(frozen)
        .with_parallelism(1)
        .run(harness.config(ExecutionRequest::new()), &run_plan, tx, CancellationToken::new())
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert!(!report.any_failed());
    assert!(elapsed >= Duration::from_millis(150), "expected serialized wave to take >=150ms, took {elapsed:?}");
}

#[tokio::test]
async fn one_scanners_failure_does_not_stop_an_independent_sibling() {
    let harness = Harness::new();
    let mut registry = ScannerRegistry::new();
    registry.register(Arc::new(FakeScanner::new("gitleaks").outcome(FakeOutcome::Failed))).unwrap();
    registry.register(Arc::new(FakeScanner::new("semgrep"))).unwrap();
    let frozen = Arc::new(registry.freeze().unwrap());
    let requested = [ScannerName::new("gitleaks"), ScannerName::new("semgrep")].into_iter().collect();
    let run_plan = plan(&frozen, &requested).unwrap();

    let (tx, _rx) = broadcast::channel(16);
    let report = scheduler(frozen)
        .run(harness.config(ExecutionRequest::new()), &run_plan, tx, CancellationToken::new())
        .await
        .unwrap();

    assert!(report.any_failed());
    assert_eq!(report.manifest.scanners["gitleaks"].status, ScanStatus::Failed);
    assert_eq!(report.manifest.scanners["semgrep"].status, ScanStatus::Complete);
}

#[tokio::test]
async fn a_failed_dependency_skips_its_dependent_without_running_it() {
    let harness = Harness::new();
    let mut registry = ScannerRegistry::new();
    registry.register(Arc::new(FakeScanner::new("sbom").outcome(FakeOutcome::Failed))).unwrap();
    let osv = FakeScanner::new("osv").depends_on(["sbom"]);
    let osv_runs = osv.run_count();
    registry.register(Arc::new(osv)).unwrap();
    let frozen = Arc::new(registry.freeze().unwrap());
    let requested = [ScannerName::new("osv")].into_iter().collect();
    let run_plan = plan(&frozen, &requested).unwrap();

    let (tx, _rx) = broadcast::channel(16);
    let report = scheduler(frozen)
        .run(harness.config(ExecutionRequest::new()), &run_plan, tx, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.manifest.scanners["sbom"].status, ScanStatus::Failed);
    assert_eq!(report.manifest.scanners["osv"].status, ScanStatus::Skipped);
    assert_eq!(
        report.manifest.scanners["osv"].exit_reason,
        Some(zero_core::ExitReason::DependencyFailed)
    );
    assert_eq!(osv_runs.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn a_scanner_that_ignores_its_deadline_is_reported_as_timed_out() {
    let harness = Harness::new();
    let mut registry = ScannerRegistry::new();
    registry.register(Arc::new(FakeScanner::new("checkov").outcome(FakeOutcome::Hang))).unwrap();
    let frozen = Arc::new(registry.freeze().unwrap());
    let requested = [ScannerName::new("checkov")].into_iter().collect();
    let run_plan = plan(&frozen, &requested).unwrap();

    let (tx, _rx) = broadcast::channel(16);
    let report = scheduler(frozen)
        .with_default_timeout(Duration::from_millis(50))
        .run(harness.config(ExecutionRequest::new()), &run_plan, tx, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.manifest.scanners["checkov"].status, ScanStatus::Cancelled);
    assert_eq!(report.manifest.scanners["checkov"].exit_reason, Some(zero_core::ExitReason::Timeout));
}

#[tokio::test]
async fn run_level_cancellation_aborts_a_hung_scanner_after_the_grace_period() {
    let harness = Harness::new();
    let mut registry = ScannerRegistry::new();
    registry.register(Arc::new(FakeScanner::new("checkov").outcome(FakeOutcome::Hang))).unwrap();
    let frozen = Arc::new(registry.freeze().unwrap());
    let requested = [ScannerName::new("checkov")].into_iter().collect();
    let run_plan = plan(&frozen, &requested).unwrap();

    let cancel = CancellationToken::new();
    let cancel_trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        cancel_trigger.cancel();
    });

    let (tx, _rx) = broadcast::channel(16);
    let report = scheduler(frozen)
        .with_default_timeout(Duration::from_secs(10))
        .with_grace_period(Duration::from_millis(50))
        .run(harness.config(ExecutionRequest::new()), &run_plan, tx, cancel)
        .await
        .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.manifest.scanners["checkov"].status, ScanStatus::Cancelled);
}

#[tokio::test]
async fn requesting_a_scanner_that_depends_on_sbom_runs_sbom_first() {
    let harness = Harness::new();
    let mut registry = ScannerRegistry::new();
    registry.register(Arc::new(FakeScanner::new("sbom"))).unwrap();
    registry.register(Arc::new(FakeScanner::new("osv").depends_on(["sbom"]))).unwrap();
    let frozen = Arc::new(registry.freeze().unwrap());
    let requested = [ScannerName::new("osv")].into_iter().collect();
    let run_plan = plan(&frozen, &requested).unwrap();

    let (tx, _rx) = broadcast::channel(16);
    let report = scheduler(frozen)
        .run(harness.config(ExecutionRequest::new()), &run_plan, tx, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.manifest.scanners["sbom"].status, ScanStatus::Complete);
    assert_eq!(report.manifest.scanners["osv"].status, ScanStatus::Complete);
}
