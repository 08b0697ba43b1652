// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn missing_sbom_artifact_is_none_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = StoredArtifacts::new(StoreSharedArtifacts::new(dir.path()));
    assert_eq!(adapter.sbom_cyclonedx(), None);
    assert_eq!(adapter.get_raw("osv"), None);
}

#[test]
fn present_artifact_round_trips_as_raw_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("gitleaks.json"), r#"{"scanner":"gitleaks","findings":[]}"#).unwrap();
    let adapter = StoredArtifacts::new(StoreSharedArtifacts::new(dir.path()));
    let value = adapter.get_raw("gitleaks").unwrap();
    assert_eq!(value["scanner"], "gitleaks");
}

#[test]
fn malformed_json_is_treated_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("sbom.cdx.json"), "not json").unwrap();
    let adapter = StoredArtifacts::new(StoreSharedArtifacts::new(dir.path()));
    assert_eq!(adapter.sbom_cyclonedx(), None);
}
