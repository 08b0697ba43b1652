// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::Utc;
use tempfile::tempdir;

#[test]
fn reads_a_completed_sibling_artifact() {
    let dir = tempdir().unwrap();
    let header = ArtifactHeader::new("sbom", Utc::now());
    crate::atomic::write_json_atomic(&dir.path().join("sbom.json"), &header).unwrap();

    let shared = SharedArtifacts::new(dir.path());
    let back = shared.get("sbom").unwrap();
    assert_eq!(back, Some(header));
}

#[test]
fn missing_sibling_is_none() {
    let dir = tempdir().unwrap();
    let shared = SharedArtifacts::new(dir.path());
    assert!(shared.get("osv").unwrap().is_none());
}

#[test]
fn sbom_cyclonedx_present_only_after_sbom_scanner_writes_it() {
    let dir = tempdir().unwrap();
    let shared = SharedArtifacts::new(dir.path());
    assert!(shared.sbom_cyclonedx().unwrap().is_none());

    std::fs::write(
        dir.path().join("sbom.cdx.json"),
        serde_json::to_vec(&serde_json::json!({"bomFormat": "CycloneDX"})).unwrap(),
    )
    .unwrap();
    assert!(shared.sbom_cyclonedx().unwrap().is_some());
}
