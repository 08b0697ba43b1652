// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use zero_core::Severity;

#[test]
fn round_trips_through_json() {
    let header = ArtifactHeader::new("gitleaks", Utc::now())
        .with_summary(serde_json::json!({"leaks_found": 2}))
        .with_findings(vec![Finding::new(
            "gitleaks",
            Severity::High,
            "secret",
            "AWS key in history",
        )]);
    let raw = serde_json::to_string(&header).expect("serialize");
    let back: ArtifactHeader = serde_json::from_str(&raw).expect("deserialize");
    assert_eq!(back, header);
}

#[test]
fn tolerates_scanner_defined_extra_fields() {
    let raw = serde_json::json!({
        "scanner": "trivy",
        "generated_at": Utc::now().to_rfc3339(),
        "summary": {},
        "findings": [],
        "trivy_db_version": "2026-07-01",
    });
    let header: ArtifactHeader =
        serde_json::from_value(raw).expect("unknown top-level fields are ignored");
    assert_eq!(header.scanner, "trivy");
}

#[test]
fn missing_summary_and_findings_default_to_empty() {
    let raw = serde_json::json!({
        "scanner": "sbom",
        "generated_at": Utc::now().to_rfc3339(),
    });
    let header: ArtifactHeader = serde_json::from_value(raw).expect("deserialize");
    assert!(header.findings.is_empty());
    assert_eq!(header.summary, serde_json::json!({}));
}
