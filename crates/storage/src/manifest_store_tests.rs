// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::Utc;
use tempfile::tempdir;
use zero_core::{ScanId, ScanStatus, Target};

fn sample() -> Manifest {
    Manifest::new(ScanId::new(), Target::new("acme", "widgets"), "quick", Utc::now())
}

#[test]
fn write_then_read_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    let manifest = sample();
    write_manifest(&path, &manifest).unwrap();
    let back = read_manifest(&path).unwrap().unwrap();
    assert_eq!(back.scan_id, manifest.scan_id);
}

#[test]
fn read_of_missing_manifest_is_none() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    assert!(read_manifest(&path).unwrap().is_none());
}

#[test]
fn update_scanner_entry_is_read_modify_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    write_manifest(&path, &sample()).unwrap();

    update_scanner_entry(&path, "gitleaks", |e| {
        e.status = ScanStatus::Pending;
        e.started_at = Some(Utc::now());
    })
    .unwrap();

    let manifest = update_scanner_entry(&path, "gitleaks", |e| {
        e.finish(ScanStatus::Complete, Utc::now(), None);
    })
    .unwrap();

    let entry = manifest.scanners.get("gitleaks").unwrap();
    assert_eq!(entry.status, ScanStatus::Complete);
    assert!(entry.duration_ms.is_some());
}

#[test]
fn update_scanner_entry_on_missing_manifest_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    let err = update_scanner_entry(&path, "gitleaks", |_| {});
    assert!(err.is_err());
}
