// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test-only builders shared across crates (enabled via `test-support` feature).

use crate::finding::Finding;
use crate::severity::Severity;
use crate::target::Target;

pub fn test_target() -> Target {
    Target::new("acme", "widgets")
}

pub fn test_finding(scanner: &str, severity: Severity) -> Finding {
    Finding::new(scanner, severity, "test-category", "test finding")
}
