// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::Utc;
use tempfile::tempdir;
use zero_core::{Freshness, Severity, SeverityRollup};
use zero_wire::IndexEntry;

#[test]
fn removes_the_subtree_and_index_row() {
    let dir = tempdir().unwrap();
    let layout = Layout::new(dir.path());
    let target = Target::new("acme", "widgets");

    std::fs::create_dir_all(layout.analysis_dir(&target)).unwrap();
    index_store::upsert_target(
        &layout.index_path(),
        &target.slug(),
        IndexEntry {
            last_scan: Utc::now(),
            worst_severity: SeverityRollup::Severity(Severity::Low),
            freshness: Freshness::Fresh,
        },
    )
    .unwrap();

    clean_target(&layout, &target).unwrap();

    assert!(!layout.target_dir(&target).exists());
    let index = index_store::read_index(&layout.index_path()).unwrap();
    assert!(!index.targets.contains_key(&target.slug()));
}

#[test]
fn cleaning_an_unknown_target_is_not_an_error() {
    let dir = tempdir().unwrap();
    let layout = Layout::new(dir.path());
    let target = Target::new("acme", "ghost");
    clean_target(&layout, &target).unwrap();
}
