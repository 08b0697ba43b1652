// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use zero_scanners::FakeScanner;

use super::*;
use crate::registry::ScannerRegistry;

fn names(ns: impl IntoIterator<Item = &'static str>) -> BTreeSet<ScannerName> {
    ns.into_iter().map(ScannerName::new).collect()
}

#[test]
fn single_scanner_with_no_deps_is_one_wave_of_one() {
    let mut registry = ScannerRegistry::new();
    registry.register(Arc::new(FakeScanner::new("sbom"))).unwrap();
    let frozen = registry.freeze().unwrap();

    let plan = plan(&frozen, &names(["sbom"])).unwrap();
    assert_eq!(plan.waves, vec![vec![ScannerName::new("sbom")]]);
}

#[test]
fn linear_chain_is_one_scanner_per_wave() {
    let mut registry = ScannerRegistry::new();
    registry.register(Arc::new(FakeScanner::new("a"))).unwrap();
    registry.register(Arc::new(FakeScanner::new("b").depends_on(["a"]))).unwrap();
    registry.register(Arc::new(FakeScanner::new("c").depends_on(["b"]))).unwrap();
    let frozen = registry.freeze().unwrap();

    let plan = plan(&frozen, &names(["c"])).unwrap();
    assert_eq!(
        plan.waves,
        vec![vec![ScannerName::new("a")], vec![ScannerName::new("b")], vec![ScannerName::new("c")]]
    );
}

#[test]
fn diamond_puts_the_two_middle_scanners_in_the_same_wave() {
    let mut registry = ScannerRegistry::new();
    registry.register(Arc::new(FakeScanner::new("a"))).unwrap();
    registry.register(Arc::new(FakeScanner::new("b").depends_on(["a"]))).unwrap();
    registry.register(Arc::new(FakeScanner::new("c").depends_on(["a"]))).unwrap();
    registry.register(Arc::new(FakeScanner::new("d").depends_on(["b", "c"]))).unwrap();
    let frozen = registry.freeze().unwrap();

    let plan = plan(&frozen, &names(["d"])).unwrap();
    assert_eq!(
        plan.waves,
        vec![
            vec![ScannerName::new("a")],
            vec![ScannerName::new("b"), ScannerName::new("c")],
            vec![ScannerName::new("d")],
        ]
    );
}

#[test]
fn requesting_a_scanner_pulls_in_its_dependency_even_if_unrequested() {
    let mut registry = ScannerRegistry::new();
    registry.register(Arc::new(FakeScanner::new("sbom"))).unwrap();
    registry.register(Arc::new(FakeScanner::new("osv").depends_on(["sbom"]))).unwrap();
    let frozen = registry.freeze().unwrap();

    let plan = plan(&frozen, &names(["osv"])).unwrap();
    assert_eq!(plan.len(), 2);
    assert_eq!(plan.waves[0], vec![ScannerName::new("sbom")]);
}

#[test]
fn independent_scanners_in_the_same_request_share_a_wave_alphabetically() {
    let mut registry = ScannerRegistry::new();
    registry.register(Arc::new(FakeScanner::new("gitleaks"))).unwrap();
    registry.register(Arc::new(FakeScanner::new("semgrep"))).unwrap();
    let frozen = registry.freeze().unwrap();

    let plan = plan(&frozen, &names(["semgrep", "gitleaks"])).unwrap();
    assert_eq!(plan.waves, vec![vec![ScannerName::new("gitleaks"), ScannerName::new("semgrep")]]);
}

#[test]
fn plan_is_deterministic_across_repeated_calls() {
    let mut registry = ScannerRegistry::new();
    registry.register(Arc::new(FakeScanner::new("a"))).unwrap();
    registry.register(Arc::new(FakeScanner::new("b").depends_on(["a"]))).unwrap();
    let frozen = registry.freeze().unwrap();

    let first = plan(&frozen, &names(["b"])).unwrap();
    let second = plan(&frozen, &names(["b"])).unwrap();
    assert_eq!(first, second);
}
