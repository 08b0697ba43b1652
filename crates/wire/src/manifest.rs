// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The bit-stable per-scan-generation record (`manifest.json`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use zero_core::{ExitReason, ScanId, ScanStatus, Target};

/// One scanner's row inside a [`Manifest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannerEntry {
    pub status: ScanStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_reason: Option<ExitReason>,
}

impl ScannerEntry {
    pub fn pending() -> Self {
        Self {
            status: ScanStatus::Pending,
            started_at: None,
            completed_at: None,
            duration_ms: None,
            exit_reason: None,
        }
    }

    pub fn started(started_at: DateTime<Utc>) -> Self {
        Self {
            status: ScanStatus::Pending,
            started_at: Some(started_at),
            completed_at: None,
            duration_ms: None,
            exit_reason: None,
        }
    }

    pub fn finish(
        &mut self,
        status: ScanStatus,
        completed_at: DateTime<Utc>,
        exit_reason: Option<ExitReason>,
    ) {
        self.status = status;
        self.duration_ms = self
            .started_at
            .map(|s| (completed_at - s).num_milliseconds().max(0) as u64);
        self.completed_at = Some(completed_at);
        self.exit_reason = exit_reason;
    }
}

/// The engine-owned, bit-stable record of one scan generation over one target.
///
/// Written at `<home>/<owner>/<repo>/<scan_id>/manifest.json` (spec.md §3/§6)
/// and re-read by the Freshness Tracker and `Status` driver operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub scan_id: ScanId,
    pub target: Target,
    pub profile: String,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scanners: BTreeMap<String, ScannerEntry>,
}

impl Manifest {
    pub fn new(scan_id: ScanId, target: Target, profile: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            scan_id,
            target,
            profile: profile.into(),
            started_at,
            ended_at: None,
            scanners: BTreeMap::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.scanners.values().all(|e| e.status.is_terminal())
    }

    pub fn any_failed(&self) -> bool {
        self.scanners
            .values()
            .any(|e| e.status == ScanStatus::Failed)
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
