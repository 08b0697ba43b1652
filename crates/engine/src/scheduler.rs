// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Run Scheduler (spec.md §4.4): executes a [`Plan`] wave by wave with
//! bounded parallelism, isolating one scanner's failure from its siblings,
//! enforcing per-scanner deadlines, and flushing the manifest as each
//! scanner terminates.
//!
//! A scanner's own collaborator code is expected to honor `ScanContext`'s
//! deadline and cancellation token (spec.md §3; every built-in scanner races
//! its subprocess against both via `zero-shell::run`). The scheduler adds a
//! second, slightly longer backstop timeout around the whole `run` call so
//! one badly-behaved collaborator — in-process, or ignoring its context —
//! cannot hang a run indefinitely.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, Mutex as AsyncMutex, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use zero_core::{Clock, ExitReason, ScanId, ScanStatus, ScannerName, Target};
use zero_profiles::ExecutionRequest;
use zero_scanners::{ScanContext, ScanOptions, ScannerDescriptor, SharedArtifacts};
use zero_store::manifest::{update_scanner_entry, write_manifest};
use zero_wire::{Manifest, ProgressEvent, ScannerEntry};

use crate::error::EngineError;
use crate::planner::Plan;
use crate::registry::FrozenRegistry;

/// Backstop margin added on top of a scanner's own deadline before the
/// scheduler gives up on a collaborator that didn't honor its context.
const BACKSTOP_MARGIN: Duration = Duration::from_millis(500);

pub const DEFAULT_PARALLELISM: usize = 4;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(30);

pub struct RunConfig {
    pub scan_id: ScanId,
    pub target: Target,
    pub profile: String,
    pub request: ExecutionRequest,
    pub working_tree: PathBuf,
    pub artifact_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub shared_artifacts: Arc<dyn SharedArtifacts>,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub manifest: Manifest,
    pub cancelled: bool,
}

impl RunReport {
    pub fn any_failed(&self) -> bool {
        self.manifest.any_failed()
    }
}

pub struct RunScheduler<C: Clock> {
    registry: Arc<FrozenRegistry>,
    clock: C,
    parallelism: usize,
    default_timeout: Duration,
    grace_period: Duration,
}

impl<C: Clock> RunScheduler<C> {
    pub fn new(registry: Arc<FrozenRegistry>, clock: C) -> Self {
        Self {
            registry,
            clock,
            parallelism: DEFAULT_PARALLELISM,
            default_timeout: DEFAULT_TIMEOUT,
            grace_period: DEFAULT_GRACE_PERIOD,
        }
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism.max(1);
        self
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.clock.epoch_ms() as i64).unwrap_or_else(Utc::now)
    }

    /// Execute `plan` to completion (or until `cancel` fires and the grace
    /// period elapses), returning the final manifest.
    pub async fn run(
        &self,
        config: RunConfig,
        plan: &Plan,
        progress: broadcast::Sender<ProgressEvent>,
        cancel: CancellationToken,
    ) -> Result<RunReport, EngineError> {
        let started_at = self.now();
        let mut manifest =
            Manifest::new(config.scan_id.clone(), config.target.clone(), config.profile.clone(), started_at);
        for name in plan.all_scanners() {
            manifest.scanners.insert(name.to_string(), ScannerEntry::pending());
        }
        write_manifest(&config.manifest_path, &manifest)?;

        let manifest_lock = Arc::new(AsyncMutex::new(()));
        let mut final_status: BTreeMap<ScannerName, ScanStatus> = BTreeMap::new();
        let mut cancelled = false;

        for wave in &plan.waves {
            if cancelled {
                break;
            }

            let mut runnable = Vec::new();
            // Allow expect here: every name in `wave` came from `plan`, which
            // was built from this same registry.
            #[allow(clippy::expect_used)]
            for name in wave {
                let scanner = self.registry.get(name).expect("planned scanner is registered");
                let blocked = scanner
                    .dependencies()
                    .iter()
                    .any(|dep| final_status.get(dep).is_some_and(|s| *s != ScanStatus::Complete));
                if blocked {
                    self.record_terminal(
                        &config.manifest_path,
                        &manifest_lock,
                        name,
                        ScanStatus::Skipped,
                        Some(ExitReason::DependencyFailed),
                        None,
                    )
                    .await?;
                    let _ = progress.send(ProgressEvent::ScannerFailed {
                        scanner: name.clone(),
                        exit_reason: ExitReason::DependencyFailed,
                    });
                    final_status.insert(name.clone(), ScanStatus::Skipped);
                } else {
                    runnable.push(name.clone());
                }
            }

            if runnable.is_empty() {
                continue;
            }

            let permits = runnable.len().min(self.parallelism);
            let semaphore = Arc::new(Semaphore::new(permits));
            let mut tasks: JoinSet<ScannerOutcome> = JoinSet::new();
            let mut task_names: BTreeMap<tokio::task::Id, ScannerName> = BTreeMap::new();

            // Allow expect here: `runnable` is a subset of `wave`, already
            // verified registered above.
            #[allow(clippy::expect_used)]
            for name in &runnable {
                let scanner = Arc::clone(self.registry.get(name).expect("planned scanner is registered"));
                let options = ScanOptions {
                    features: config.request.scanners.get(name).cloned().unwrap_or_default(),
                };
                let ctx = ScanContext {
                    working_tree: config.working_tree.clone(),
                    artifact_dir: config.artifact_dir.clone(),
                    shared_artifacts: Arc::clone(&config.shared_artifacts),
                    deadline: self.default_timeout,
                    cancel: cancel.clone(),
                };
                let artifact_path = config.artifact_dir.join(format!("{name}.json"));
                let semaphore = Arc::clone(&semaphore);
                let manifest_path = config.manifest_path.clone();
                let progress = progress.clone();
                let name = name.clone();
                let started_at = self.now();
                let backstop = self.default_timeout + BACKSTOP_MARGIN;
                let run_cancel = cancel.clone();

                let handle = tasks.spawn(async move {
                    // Allow expect here: this semaphore is never closed —
                    // nothing ever calls `close()` on it.
                    #[allow(clippy::expect_used)]
                    let _permit = semaphore.acquire().await.expect("semaphore is never closed");
                    info!(scanner = %name, "scanner starting");
                    let _ = update_scanner_entry(&manifest_path, name.as_str(), |entry| {
                        *entry = ScannerEntry::started(started_at)
                    })
                    .map_err(|err| warn!(scanner = %name, %err, "failed to record scanner start"));
                    let _ = progress.send(ProgressEvent::ScannerStarted { scanner: name.clone() });

                    match tokio::time::timeout(backstop, scanner.run(&ctx, &options)).await {
                        Ok(result) => ScannerOutcome::from_result(result, run_cancel.is_cancelled(), &artifact_path),
                        Err(_) => ScannerOutcome {
                            status: ScanStatus::Cancelled,
                            exit_reason: Some(ExitReason::Timeout),
                            duration: backstop,
                        },
                    }
                });
                task_names.insert(handle.id(), name);
            }

            let wave_results = self.drain_wave(tasks, task_names, cancel.clone(), self.grace_period).await;
            if cancel.is_cancelled() {
                cancelled = true;
            }

            for (name, outcome) in wave_results {
                self.record_terminal(
                    &config.manifest_path,
                    &manifest_lock,
                    &name,
                    outcome.status,
                    outcome.exit_reason.clone(),
                    Some(outcome.duration),
                )
                .await?;
                let event = match outcome.status {
                    ScanStatus::Complete => ProgressEvent::ScannerCompleted {
                        scanner: name.clone(),
                        duration_ms: outcome.duration.as_millis() as u64,
                    },
                    ScanStatus::Cancelled => ProgressEvent::ScannerCancelled {
                        scanner: name.clone(),
                        exit_reason: outcome.exit_reason.clone().unwrap_or(ExitReason::Cancelled),
                    },
                    _ => ProgressEvent::ScannerFailed {
                        scanner: name.clone(),
                        exit_reason: outcome.exit_reason.clone().unwrap_or(ExitReason::Other("unknown".into())),
                    },
                };
                let _ = progress.send(event);
                final_status.insert(name, outcome.status);
            }
        }

        if cancelled {
            self.mark_unstarted_as_cancelled(&config.manifest_path, &manifest_lock, plan, &final_status).await?;
        }

        // Allow expect here: this run wrote the manifest at the top of this
        // function before any scanner started.
        #[allow(clippy::expect_used)]
        let mut manifest = zero_store::manifest::read_manifest(&config.manifest_path)?
            .expect("manifest was written at the start of this run");
        manifest.ended_at = Some(self.now());
        write_manifest(&config.manifest_path, &manifest)?;

        Ok(RunReport { manifest, cancelled })
    }

    async fn record_terminal(
        &self,
        manifest_path: &std::path::Path,
        manifest_lock: &Arc<AsyncMutex<()>>,
        name: &ScannerName,
        status: ScanStatus,
        exit_reason: Option<ExitReason>,
        _duration: Option<Duration>,
    ) -> Result<(), EngineError> {
        let _guard = manifest_lock.lock().await;
        let completed_at = self.now();
        update_scanner_entry(manifest_path, name.as_str(), |entry| {
            entry.finish(status, completed_at, exit_reason)
        })?;
        Ok(())
    }

    async fn mark_unstarted_as_cancelled(
        &self,
        manifest_path: &std::path::Path,
        manifest_lock: &Arc<AsyncMutex<()>>,
        plan: &Plan,
        final_status: &BTreeMap<ScannerName, ScanStatus>,
    ) -> Result<(), EngineError> {
        for name in plan.all_scanners() {
            if final_status.contains_key(name) {
                continue;
            }
            self.record_terminal(manifest_path, manifest_lock, name, ScanStatus::Cancelled, Some(ExitReason::Cancelled), None)
                .await?;
        }
        Ok(())
    }

    async fn drain_wave(
        &self,
        mut tasks: JoinSet<ScannerOutcome>,
        task_names: BTreeMap<tokio::task::Id, ScannerName>,
        cancel: CancellationToken,
        grace_period: Duration,
    ) -> Vec<(ScannerName, ScannerOutcome)> {
        let mut results = Vec::new();
        let mut grace_deadline: Option<tokio::time::Instant> = None;

        loop {
            if tasks.is_empty() {
                break;
            }
            let sleep = async {
                match grace_deadline {
                    Some(deadline) => tokio::time::sleep_until(deadline).await,
                    None => std::future::pending::<()>().await,
                }
            };
            tokio::select! {
                joined = tasks.join_next_with_id() => {
                    if let Some(joined) = joined {
                        results.push(resolve_join_result(joined, &task_names));
                    }
                }
                _ = cancel.cancelled(), if grace_deadline.is_none() => {
                    warn!(?grace_period, "run cancelled; starting grace period before aborting in-flight scanners");
                    grace_deadline = Some(tokio::time::Instant::now() + grace_period);
                }
                _ = sleep, if grace_deadline.is_some() => {
                    warn!("grace period elapsed; aborting remaining scanners");
                    tasks.abort_all();
                }
            }
        }
        results
    }
}

struct ScannerOutcome {
    status: ScanStatus,
    exit_reason: Option<ExitReason>,
    duration: Duration,
}

impl ScannerOutcome {
    fn from_result(result: zero_scanners::ScanResult, run_was_cancelled: bool, artifact_path: &std::path::Path) -> Self {
        match result.status {
            ScanStatus::Complete => {
                if artifact_path.exists() {
                    Self { status: ScanStatus::Complete, exit_reason: None, duration: result.duration }
                } else {
                    Self {
                        status: ScanStatus::Failed,
                        exit_reason: Some(ExitReason::MissingArtifact),
                        duration: result.duration,
                    }
                }
            }
            ScanStatus::Cancelled => Self {
                status: ScanStatus::Cancelled,
                exit_reason: Some(if run_was_cancelled { ExitReason::Cancelled } else { ExitReason::Timeout }),
                duration: result.duration,
            },
            ScanStatus::Failed => Self {
                status: ScanStatus::Failed,
                exit_reason: Some(ExitReason::Other(result.error.unwrap_or_else(|| "scanner failed".to_string()))),
                duration: result.duration,
            },
            ScanStatus::Skipped | ScanStatus::Pending => Self {
                status: result.status,
                exit_reason: None,
                duration: result.duration,
            },
        }
    }
}

fn resolve_join_result(
    joined: Result<(tokio::task::Id, ScannerOutcome), tokio::task::JoinError>,
    task_names: &BTreeMap<tokio::task::Id, ScannerName>,
) -> (ScannerName, ScannerOutcome) {
    match joined {
        Ok((id, outcome)) => (task_names.get(&id).cloned().unwrap_or_else(|| ScannerName::new("unknown")), outcome),
        Err(join_err) => {
            let name = task_names.get(&join_err.id()).cloned().unwrap_or_else(|| ScannerName::new("unknown"));
            if join_err.is_panic() {
                (name, ScannerOutcome { status: ScanStatus::Failed, exit_reason: Some(ExitReason::Panic), duration: Duration::ZERO })
            } else {
                (name, ScannerOutcome {
                    status: ScanStatus::Cancelled,
                    exit_reason: Some(ExitReason::Cancelled),
                    duration: Duration::ZERO,
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
