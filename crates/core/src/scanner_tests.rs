// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn scanner_name_roundtrips_through_json() {
    let name = ScannerName::new("osv");
    let json = serde_json::to_string(&name).unwrap();
    assert_eq!(json, "\"osv\"");
    let back: ScannerName = serde_json::from_str(&json).unwrap();
    assert_eq!(back, name);
}

#[test]
fn pending_is_not_terminal_but_others_are() {
    assert!(!ScanStatus::Pending.is_terminal());
    for status in [
        ScanStatus::Complete,
        ScanStatus::Failed,
        ScanStatus::Skipped,
        ScanStatus::Cancelled,
    ] {
        assert!(status.is_terminal());
    }
}

#[parameterized(
    dependency_failed = { "dependency-failed", ExitReason::DependencyFailed },
    missing_artifact = { "missing-artifact", ExitReason::MissingArtifact },
    timeout = { "timeout", ExitReason::Timeout },
    panic = { "panic", ExitReason::Panic },
)]
fn exit_reason_known_values_roundtrip(raw: &str, expected: ExitReason) {
    let parsed = ExitReason::from(raw);
    assert_eq!(parsed, expected);
    assert_eq!(parsed.as_str(), raw);
}

#[test]
fn exit_reason_unknown_value_is_preserved_verbatim() {
    let parsed = ExitReason::from("disk-full");
    assert_eq!(parsed, ExitReason::Other("disk-full".to_string()));
    assert_eq!(parsed.as_str(), "disk-full");
}
