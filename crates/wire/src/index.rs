// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The repo-wide rollup consulted by the `Status` driver operation
//! (`index.json`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use zero_core::{Freshness, SeverityRollup};

/// One target's row inside the [`Index`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub last_scan: DateTime<Utc>,
    pub worst_severity: SeverityRollup,
    pub freshness: Freshness,
}

/// The top-level shape of `index.json`: a map from `"<owner>/<repo>"` to its
/// most recent rollup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Index {
    #[serde(default)]
    pub targets: BTreeMap<String, IndexEntry>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&mut self, slug: impl Into<String>, entry: IndexEntry) {
        self.targets.insert(slug.into(), entry);
    }

    pub fn remove(&mut self, slug: &str) -> Option<IndexEntry> {
        self.targets.remove(slug)
    }
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod tests;
