// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status rollup (spec.md §4.8, §6 `Status` driver operation): bridges the
//! Index and the manifest into a per-target summary for both the `status`
//! CLI command and its `--json` mode.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use zero_core::{Clock, Freshness, FreshnessThresholds, SeverityRollup, Target};
use zero_engine::FreshnessTracker;
use zero_store::Layout;
use zero_wire::{Manifest, ScannerEntry};

use crate::error::DriverError;

/// Recompute a target's freshness rollup from its manifest's per-scanner
/// `completed_at` timestamps against `clock`'s current time (spec.md §4.6:
/// "derived from manifest `completed_at` and the current wall clock"). The
/// index's own `freshness` field is a write-through cache (spec.md §4.6
/// "Derived cache"), not the source of truth — it is never consulted here.
/// A target with no manifest, or a manifest with no completed scanner, is
/// `Expired` (spec.md §4.6 "a target with no manifest is `Expired`").
fn classify_from_manifest<C: Clock>(
    manifest: Option<&Manifest>,
    thresholds: FreshnessThresholds,
    clock: &C,
) -> Freshness {
    let tracker = FreshnessTracker::new(thresholds, clock.clone());
    let completions = manifest
        .into_iter()
        .flat_map(|m| m.scanners.values())
        .filter_map(|entry| entry.completed_at);
    tracker.classify_target(completions).unwrap_or(Freshness::Expired)
}

/// One target's row for the `status` driver operation. Failed or skipped
/// scanners are visible via `scanners` (spec.md §7 "User-visible
/// behavior").
#[derive(Debug, Clone, Serialize)]
pub struct TargetSummary {
    pub target: Target,
    pub last_scan: DateTime<Utc>,
    pub worst_severity: SeverityRollup,
    pub freshness: Freshness,
    #[serde(default)]
    pub scanners: BTreeMap<String, ScannerEntry>,
}

/// `ListTargets() → sequence of TargetSummary` (spec.md §4.8).
pub fn list_targets<C: Clock>(
    layout: &Layout,
    thresholds: FreshnessThresholds,
    clock: &C,
) -> Result<Vec<TargetSummary>, DriverError> {
    let index = zero_store::index_store::read_index(&layout.index_path())?;
    let mut summaries = Vec::with_capacity(index.targets.len());
    for (slug, entry) in &index.targets {
        let target = Target::from_str(slug).map_err(|_| DriverError::CorruptIndexEntry(slug.clone()))?;
        let manifest = zero_store::manifest::read_manifest(&layout.manifest_path(&target))?;
        let freshness = classify_from_manifest(manifest.as_ref(), thresholds, clock);
        summaries.push(TargetSummary {
            target,
            last_scan: entry.last_scan,
            worst_severity: entry.worst_severity,
            freshness,
            scanners: manifest.map(|m| m.scanners).unwrap_or_default(),
        });
    }
    Ok(summaries)
}

/// One target's summary, for drivers that already know which target they
/// want (rather than enumerating the whole index).
pub fn target_summary<C: Clock>(
    layout: &Layout,
    target: &Target,
    thresholds: FreshnessThresholds,
    clock: &C,
) -> Result<Option<TargetSummary>, DriverError> {
    let index = zero_store::index_store::read_index(&layout.index_path())?;
    let Some(entry) = index.targets.get(&target.slug()) else {
        return Ok(None);
    };
    let manifest = zero_store::manifest::read_manifest(&layout.manifest_path(target))?;
    let freshness = classify_from_manifest(manifest.as_ref(), thresholds, clock);
    Ok(Some(TargetSummary {
        target: target.clone(),
        last_scan: entry.last_scan,
        worst_severity: entry.worst_severity,
        freshness,
        scanners: manifest.map(|m| m.scanners).unwrap_or_default(),
    }))
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
