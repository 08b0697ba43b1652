// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `freshness.json`: a derived, write-through cache of freshness rollups
//! (spec.md §4.5 layout). Never the source of truth — the manifest's
//! `completed_at` timestamps are (spec.md §3) — but consulted by `Status`
//! without re-deriving from the manifest on every call.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use zero_core::Freshness;

use crate::atomic::{read_json, write_json_atomic};
use crate::error::StoreError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FreshnessCache {
    #[serde(default)]
    pub scanners: BTreeMap<String, Freshness>,
    #[serde(default)]
    pub target: Option<Freshness>,
}

impl FreshnessCache {
    /// The target-level rollup is the worst (staleness-wise) of its scanners.
    pub fn recompute_target(&mut self) {
        self.target = self.scanners.values().copied().max();
    }
}

pub fn write_freshness_cache(path: &Path, cache: &FreshnessCache) -> Result<(), StoreError> {
    write_json_atomic(path, cache)
}

pub fn read_freshness_cache(path: &Path) -> Result<FreshnessCache, StoreError> {
    Ok(read_json(path)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "freshness_cache_tests.rs"]
mod tests;
