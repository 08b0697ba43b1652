// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ScannerDescriptor`: the contract every scanner collaborator implements
//! (spec.md §3, registered once per process into the Scanner Registry).

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use zero_core::ScannerName;

use crate::context::{ScanContext, ScanOptions};
use crate::result::ScanResult;

/// The default advisory duration estimate, used only for progress display.
pub const DEFAULT_DURATION_ESTIMATE: Duration = Duration::from_secs(30);

#[async_trait]
pub trait ScannerDescriptor: Send + Sync {
    /// Unique, stable identifier (spec.md §4.1: registry key).
    fn name(&self) -> ScannerName;

    fn description(&self) -> &str;

    /// Scanners that must reach `Complete` before this one runs.
    fn dependencies(&self) -> BTreeSet<ScannerName>;

    /// Advisory only — used for progress display, never for correctness
    /// (spec.md §3).
    fn estimate_duration(&self, _file_count: u64) -> Duration {
        DEFAULT_DURATION_ESTIMATE
    }

    async fn run(&self, ctx: &ScanContext, opts: &ScanOptions) -> ScanResult;
}

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod tests;
