// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Freshness state derived from elapsed time since a scanner last completed.
//!
//! Pure, clock-agnostic logic lives here; `zero-store` and `zero-engine`
//! supply the wall-clock `now` and the manifest timestamps.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-scanner or per-target freshness classification (spec.md §3, §4.6).
///
/// `Ord` is derived in declaration order: `Fresh < Stale < VeryStale <
/// Expired`, matching the monotonicity invariant in spec.md §8 item 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Freshness {
    Fresh,
    Stale,
    VeryStale,
    Expired,
}

crate::simple_display! {
    Freshness {
        Fresh => "Fresh",
        Stale => "Stale",
        VeryStale => "VeryStale",
        Expired => "Expired",
    }
}

/// Configurable freshness boundaries (spec.md §4.6 defaults: 24h / 7d / 30d).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(with = "thresholds_serde")]
pub struct FreshnessThresholds {
    pub stale_after: Duration,
    pub very_stale_after: Duration,
    pub expired_after: Duration,
}

impl Default for FreshnessThresholds {
    fn default() -> Self {
        Self {
            stale_after: Duration::from_secs(24 * 3600),
            very_stale_after: Duration::from_secs(7 * 24 * 3600),
            expired_after: Duration::from_secs(30 * 24 * 3600),
        }
    }
}

impl FreshnessThresholds {
    /// Classify a single scanner's age since `completed_at`.
    pub fn classify(&self, age: Duration) -> Freshness {
        if age >= self.expired_after {
            Freshness::Expired
        } else if age >= self.very_stale_after {
            Freshness::VeryStale
        } else if age >= self.stale_after {
            Freshness::Stale
        } else {
            Freshness::Fresh
        }
    }
}

mod thresholds_serde {
    use super::FreshnessThresholds;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Raw {
        #[serde(with = "humantime_serde")]
        stale_after: std::time::Duration,
        #[serde(with = "humantime_serde")]
        very_stale_after: std::time::Duration,
        #[serde(with = "humantime_serde")]
        expired_after: std::time::Duration,
    }

    pub fn serialize<S: Serializer>(t: &FreshnessThresholds, s: S) -> Result<S::Ok, S::Error> {
        Raw {
            stale_after: t.stale_after,
            very_stale_after: t.very_stale_after,
            expired_after: t.expired_after,
        }
        .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<FreshnessThresholds, D::Error> {
        let raw = Raw::deserialize(d)?;
        Ok(FreshnessThresholds {
            stale_after: raw.stale_after,
            very_stale_after: raw.very_stale_after,
            expired_after: raw.expired_after,
        })
    }
}

#[cfg(test)]
#[path = "freshness_tests.rs"]
mod tests;
