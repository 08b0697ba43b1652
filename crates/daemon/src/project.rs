// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `project.json`: target identity, origin, and first-scan time (spec.md
//! §4.5 layout). Written once, on the first `Hydrate` of a target; never
//! overwritten by later scans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zero_core::Target;
use zero_store::atomic::{read_json, write_json_atomic};
use zero_store::StoreError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub target: Target,
    pub origin: String,
    pub first_scanned_at: DateTime<Utc>,
}

/// Write `project.json` only if it does not already exist, preserving the
/// original `first_scanned_at` across repeated `Hydrate` calls.
pub fn ensure_project_record(path: &std::path::Path, target: &Target, origin: &str, now: DateTime<Utc>) -> Result<(), StoreError> {
    if read_json::<ProjectRecord>(path)?.is_some() {
        return Ok(());
    }
    let record = ProjectRecord { target: target.clone(), origin: origin.to_string(), first_scanned_at: now };
    write_json_atomic(path, &record)
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
