// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use zero_scanners::{FakeOutcome, FakeScanner};

use super::*;

#[test]
fn list_is_alphabetical_regardless_of_registration_order() {
    let mut registry = ScannerRegistry::new();
    registry.register(Arc::new(FakeScanner::new("trivy"))).unwrap();
    registry.register(Arc::new(FakeScanner::new("gitleaks"))).unwrap();
    let frozen = registry.freeze().unwrap();
    let names: Vec<_> = frozen.names().map(ScannerName::to_string).collect();
    assert_eq!(names, vec!["gitleaks", "trivy"]);
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut registry = ScannerRegistry::new();
    registry.register(Arc::new(FakeScanner::new("sbom"))).unwrap();
    let err = registry.register(Arc::new(FakeScanner::new("sbom"))).unwrap_err();
    assert!(matches!(err, EngineError::DuplicateScanner(name) if name == "sbom"));
}

#[test]
fn dangling_dependency_fails_at_freeze_time() {
    let mut registry = ScannerRegistry::new();
    registry
        .register(Arc::new(FakeScanner::new("osv").depends_on(["sbom"])))
        .unwrap();
    let err = registry.freeze().unwrap_err();
    assert!(matches!(
        err,
        EngineError::DanglingDependency { scanner, dependency }
            if scanner == "osv" && dependency == "sbom"
    ));
}

#[test]
fn direct_cycle_is_rejected() {
    let mut registry = ScannerRegistry::new();
    registry.register(Arc::new(FakeScanner::new("a").depends_on(["b"]))).unwrap();
    registry.register(Arc::new(FakeScanner::new("b").depends_on(["a"]))).unwrap();
    assert!(matches!(registry.freeze().unwrap_err(), EngineError::DependencyCycle(_)));
}

#[test]
fn self_dependency_is_a_cycle() {
    let mut registry = ScannerRegistry::new();
    registry.register(Arc::new(FakeScanner::new("a").depends_on(["a"]))).unwrap();
    assert!(matches!(registry.freeze().unwrap_err(), EngineError::DependencyCycle(_)));
}

#[test]
fn acyclic_diamond_freezes_cleanly() {
    let mut registry = ScannerRegistry::new();
    registry.register(Arc::new(FakeScanner::new("a"))).unwrap();
    registry.register(Arc::new(FakeScanner::new("b").depends_on(["a"]))).unwrap();
    registry.register(Arc::new(FakeScanner::new("c").depends_on(["a"]))).unwrap();
    registry
        .register(Arc::new(FakeScanner::new("d").depends_on(["b", "c"]).outcome(FakeOutcome::Complete)))
        .unwrap();
    let frozen = registry.freeze().unwrap();
    assert_eq!(frozen.len(), 4);
    assert!(frozen.contains(&ScannerName::new("d")));
}
