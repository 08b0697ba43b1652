// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Freshness Tracker (spec.md §4.6): derives a [`Freshness`]
//! classification from elapsed time since a scanner (or a target's worst
//! scanner) last completed.
//!
//! Thresholds are uniform across scanners (spec.md §9 open question,
//! resolved: per-scanner overrides were considered and rejected — a single
//! dial is simpler to reason about and nothing in the spec calls for
//! differential staleness between e.g. `sbom` and `semgrep`).

use std::time::Duration;

use chrono::{DateTime, Utc};
use zero_core::{Clock, Freshness, FreshnessThresholds};

pub struct FreshnessTracker<C: Clock> {
    thresholds: FreshnessThresholds,
    clock: C,
}

impl<C: Clock> FreshnessTracker<C> {
    pub fn new(thresholds: FreshnessThresholds, clock: C) -> Self {
        Self { thresholds, clock }
    }

    /// Classify one scanner's artifact by its completion time.
    pub fn classify_scanner(&self, completed_at: DateTime<Utc>) -> Freshness {
        self.thresholds.classify(self.age_since(completed_at))
    }

    /// A target's rollup is the worst (staleness-wise) of its scanners
    /// (spec.md §4.6); `None` iff no scanner has ever completed.
    pub fn classify_target<I>(&self, completions: I) -> Option<Freshness>
    where
        I: IntoIterator<Item = DateTime<Utc>>,
    {
        completions.into_iter().map(|c| self.classify_scanner(c)).max()
    }

    fn age_since(&self, completed_at: DateTime<Utc>) -> Duration {
        let now_ms = self.clock.epoch_ms();
        let completed_ms: u64 = completed_at.timestamp_millis().max(0) as u64;
        Duration::from_millis(now_ms.saturating_sub(completed_ms))
    }
}

#[cfg(test)]
#[path = "freshness_tests.rs"]
mod tests;
