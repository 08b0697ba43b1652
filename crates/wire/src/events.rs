// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress events streamed from the Run Scheduler to observers (spec.md
//! §4.4). Never persisted; a dropped observer loses nothing the manifest
//! doesn't already capture.

use serde::{Deserialize, Serialize};
use zero_core::{ExitReason, ScannerName};

/// One event on a run's progress stream.
///
/// For a given scanner, `ScannerStarted` strictly precedes its terminal
/// event (`ScannerCompleted`, `ScannerFailed`, or `ScannerCancelled`); no
/// ordering is guaranteed across scanners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum ProgressEvent {
    ScannerStarted {
        scanner: ScannerName,
    },
    /// Optional: a scanner collaborator may report sub-progress (e.g. "120/400
    /// files"). Advisory only.
    ScannerProgress {
        scanner: ScannerName,
        message: String,
    },
    ScannerCompleted {
        scanner: ScannerName,
        duration_ms: u64,
    },
    ScannerFailed {
        scanner: ScannerName,
        exit_reason: ExitReason,
    },
    ScannerCancelled {
        scanner: ScannerName,
        exit_reason: ExitReason,
    },
}

impl ProgressEvent {
    pub fn scanner(&self) -> &ScannerName {
        match self {
            ProgressEvent::ScannerStarted { scanner }
            | ProgressEvent::ScannerProgress { scanner, .. }
            | ProgressEvent::ScannerCompleted { scanner, .. }
            | ProgressEvent::ScannerFailed { scanner, .. }
            | ProgressEvent::ScannerCancelled { scanner, .. } => scanner,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ProgressEvent::ScannerStarted { .. } | ProgressEvent::ScannerProgress { .. })
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
