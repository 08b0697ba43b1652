// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Driver (spec.md §6): wires the Scanner Registry, Profile Resolver,
//! Dependency Planner, and Run Scheduler into the six operations consumed
//! by the CLI, the watcher, and the refresh loop.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use zero_core::{Clock, Freshness, ScanId, ScannerName, SeverityRollup, SystemClock, Target};
use zero_engine::{FreshnessTracker, FrozenRegistry, RunConfig, RunReport, RunScheduler, ScannerRegistry, StoredArtifacts};
use zero_profiles::Overrides;
use zero_store::freshness_cache::{write_freshness_cache, FreshnessCache};
use zero_store::{Layout, StaleLockPolicy};
use zero_wire::{ArtifactHeader, IndexEntry, ProgressEvent};

use crate::cloner::Cloner;
use crate::config::Config;
use crate::error::DriverError;
use crate::project;
use crate::status::{self, TargetSummary};
use crate::watcher::{self, WatchOptions};

pub struct Driver<C: Clock = SystemClock> {
    layout: Layout,
    config: Config,
    registry: Arc<FrozenRegistry>,
    cloner: Arc<dyn Cloner>,
    clock: C,
}

impl Driver<SystemClock> {
    /// Load configuration from `home` and build the registry from the
    /// built-in scanner catalog.
    pub fn new(home: impl Into<PathBuf>, cloner: Arc<dyn Cloner>) -> Result<Self, DriverError> {
        Self::with_clock(home, cloner, SystemClock)
    }
}

impl<C: Clock> Driver<C> {
    pub fn with_clock(home: impl Into<PathBuf>, cloner: Arc<dyn Cloner>, clock: C) -> Result<Self, DriverError> {
        let home = home.into();
        let config = Config::load(&home)?;
        let registry = build_registry()?;
        Ok(Self { layout: Layout::new(home), config, registry: Arc::new(registry), cloner, clock })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The frozen Scanner Registry, for `list` (spec.md §6 "`list`
    /// (enumerate registered scanners)").
    pub fn registry(&self) -> &FrozenRegistry {
        &self.registry
    }

    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.clock.epoch_ms() as i64).unwrap_or_else(Utc::now)
    }

    /// `Hydrate`: clone the target if it has no working tree yet, record
    /// `project.json` on first hydrate, then run a scan.
    pub async fn hydrate(&self, target: &Target, profile: &str, origin: &str) -> Result<RunReport, DriverError> {
        let (progress_tx, _progress_rx) = broadcast::channel(256);
        self.hydrate_with_progress(target, profile, origin, Overrides::new(), progress_tx, CancellationToken::new())
            .await
    }

    /// `Hydrate`, with the same progress/cancellation plumbing as
    /// [`Driver::scan_with_progress`] — the CLI and watcher use this to
    /// surface scanner lifecycle events while a first-time clone-and-scan is
    /// underway.
    pub async fn hydrate_with_progress(
        &self,
        target: &Target,
        profile: &str,
        origin: &str,
        overrides: Overrides,
        progress: broadcast::Sender<ProgressEvent>,
        cancel: CancellationToken,
    ) -> Result<RunReport, DriverError> {
        let working_tree = self.layout.working_tree_dir(target);
        if !working_tree.exists() {
            self.cloner.clone(target, &working_tree).await?;
        }
        project::ensure_project_record(&self.layout.project_path(target), target, origin, self.now())?;
        self.scan_with_progress(target, profile, overrides, progress, cancel).await
    }

    /// `Scan`: assumes a working tree is already present.
    pub async fn scan(&self, target: &Target, profile: &str, overrides: Overrides) -> Result<RunReport, DriverError> {
        let (progress_tx, _progress_rx) = broadcast::channel(256);
        self.scan_with_progress(target, profile, overrides, progress_tx, CancellationToken::new()).await
    }

    pub async fn scan_with_progress(
        &self,
        target: &Target,
        profile: &str,
        overrides: Overrides,
        progress: broadcast::Sender<ProgressEvent>,
        cancel: CancellationToken,
    ) -> Result<RunReport, DriverError> {
        let working_tree = self.layout.working_tree_dir(target);
        if !working_tree.exists() {
            return Err(DriverError::MissingWorkingTree { target: target.clone() });
        }

        let _lock = zero_store::acquire_exclusive(&self.layout.lock_path(target), StaleLockPolicy::default())?;

        let request = zero_profiles::resolve(profile, &overrides, &self.registry.known_names())?;
        let requested: BTreeSet<ScannerName> = request.scanner_names().cloned().collect();
        let plan = zero_engine::plan(&self.registry, &requested)?;

        let analysis_dir = self.layout.analysis_dir(target);
        std::fs::create_dir_all(&analysis_dir)?;
        let shared = Arc::new(StoredArtifacts::new(zero_store::SharedArtifacts::new(analysis_dir.clone())));

        let config = RunConfig {
            scan_id: ScanId::new(),
            target: target.clone(),
            profile: profile.to_string(),
            request,
            working_tree,
            artifact_dir: analysis_dir,
            manifest_path: self.layout.manifest_path(target),
            shared_artifacts: shared,
        };

        let scheduler = RunScheduler::new(Arc::clone(&self.registry), self.clock.clone())
            .with_parallelism(self.config.parallelism)
            .with_default_timeout(self.config.default_timeout)
            .with_grace_period(self.config.grace_period);

        let report = scheduler.run(config, &plan, progress, cancel).await?;

        self.update_freshness_and_index(target, &report)?;

        Ok(report)
    }

    /// `Status`: every known target's rollup, with freshness recomputed
    /// from each target's manifest against the current wall clock (spec.md
    /// §4.6) rather than trusted from the index's cached value.
    pub fn status(&self) -> Result<Vec<TargetSummary>, DriverError> {
        status::list_targets(&self.layout, self.config.freshness, &self.clock)
    }

    /// `Refresh`: re-scan `target` (or every known target) when its rollup
    /// is Stale or worse, or unconditionally when `force` is set (spec.md
    /// §6, §8 "`Refresh --force` is equivalent to `Scan` for every known
    /// target; `Refresh` without `--force` is equivalent to `Scan`
    /// restricted to targets not `Fresh`"). Freshness is recomputed from
    /// each candidate's manifest, not read from the index's cached value —
    /// the cache is only ever as fresh as the last scan that wrote it.
    pub async fn refresh(&self, target: Option<&Target>, force: bool, profile: &str) -> Result<Vec<RunReport>, DriverError> {
        let candidates = match target {
            Some(t) => vec![t.clone()],
            None => self.known_targets()?,
        };

        let mut reports = Vec::new();
        for t in candidates {
            if !force {
                let manifest = zero_store::manifest::read_manifest(&self.layout.manifest_path(&t))?;
                let tracker = FreshnessTracker::new(self.config.freshness, self.clock.clone());
                let completions = manifest.iter().flat_map(|m| m.scanners.values()).filter_map(|e| e.completed_at);
                let freshness = tracker.classify_target(completions).unwrap_or(Freshness::Expired);
                if freshness == Freshness::Fresh {
                    continue;
                }
            }
            reports.push(self.scan(&t, profile, Overrides::new()).await?);
        }
        Ok(reports)
    }

    /// `Clean`: remove a target's subtree and index entry.
    pub fn clean(&self, target: &Target) -> Result<(), DriverError> {
        Ok(zero_store::clean_target(&self.layout, target)?)
    }

    /// `Watch`: debounced, coalesced re-scans of one target's working tree,
    /// forever until `cancel` fires. `overrides` narrows each triggered scan
    /// to a scanner subset when the caller passed `--scanners` (spec.md
    /// §4.7 "`Scanners` (optional subset; default = profile)"); `progress`
    /// is re-used for every triggered scan so a long-lived observer sees the
    /// whole watch session on one stream.
    pub async fn watch(
        &self,
        target: &Target,
        profile: &str,
        overrides: Overrides,
        options: WatchOptions,
        progress: broadcast::Sender<ProgressEvent>,
        cancel: CancellationToken,
    ) -> Result<(), DriverError> {
        let working_tree = self.layout.working_tree_dir(target);
        let mut watcher = watcher::watch(&working_tree, options, cancel.clone())?;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                trigger = watcher.triggers.recv() => {
                    if trigger.is_none() {
                        return Ok(());
                    }
                    let result = self
                        .scan_with_progress(target, profile, overrides.clone(), progress.clone(), cancel.clone())
                        .await;
                    if let Err(err) = result {
                        warn!(%target, %err, "watch-triggered scan failed");
                    }
                }
            }
        }
    }

    /// Every target the index currently knows about.
    pub fn known_targets(&self) -> Result<Vec<Target>, DriverError> {
        let index = zero_store::index_store::read_index(&self.layout.index_path())?;
        index
            .targets
            .keys()
            .map(|slug| Target::from_str(slug).map_err(|_| DriverError::CorruptIndexEntry(slug.clone())))
            .collect()
    }

    fn update_freshness_and_index(&self, target: &Target, report: &RunReport) -> Result<(), DriverError> {
        let tracker = FreshnessTracker::new(self.config.freshness, self.clock.clone());

        let mut cache = FreshnessCache::default();
        for (name, entry) in &report.manifest.scanners {
            if let Some(completed_at) = entry.completed_at {
                cache.scanners.insert(name.clone(), tracker.classify_scanner(completed_at));
            }
        }
        cache.recompute_target();
        write_freshness_cache(&self.layout.freshness_path(target), &cache)?;

        let worst_severity = self.worst_severity(target, &report.manifest);
        let entry = IndexEntry {
            last_scan: report.manifest.ended_at.unwrap_or_else(|| self.now()),
            worst_severity,
            freshness: cache.target.unwrap_or(Freshness::Expired),
        };
        zero_store::index_store::upsert_target(&self.layout.index_path(), &target.slug(), entry)?;
        Ok(())
    }

    /// The worst severity across every finding embedded in this run's
    /// artifacts (spec.md §4.8 `UpdateIndex`).
    fn worst_severity(&self, target: &Target, manifest: &zero_wire::Manifest) -> SeverityRollup {
        let severities = manifest
            .scanners
            .iter()
            .filter(|(_, entry)| entry.status == zero_core::ScanStatus::Complete)
            .filter_map(|(name, _)| {
                zero_store::atomic::read_json::<ArtifactHeader>(&self.layout.artifact_path(target, name)).ok().flatten()
            })
            .flat_map(|header| header.findings)
            .map(|finding| finding.severity);
        SeverityRollup::fold(severities)
    }
}

fn build_registry() -> Result<FrozenRegistry, DriverError> {
    let mut registry = ScannerRegistry::new();
    for scanner in zero_scanners::builtin::all() {
        registry.register(Arc::from(scanner))?;
    }
    Ok(registry.freeze()?)
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
