// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The normalized finding surfaced to report renderers and agents.

use crate::scanner::{FeatureName, ScannerName};
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A location within the working tree a finding refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_start: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_end: Option<u32>,
}

impl Location {
    pub fn path(path: impl Into<String>) -> Self {
        Self { path: path.into(), line_start: None, line_end: None }
    }

    pub fn with_lines(mut self, start: u32, end: u32) -> Self {
        self.line_start = Some(start);
        self.line_end = Some(end);
        self
    }

    pub fn with_optional_lines(mut self, start: Option<u32>, end: Option<u32>) -> Self {
        self.line_start = start;
        self.line_end = end;
        self
    }
}

/// How confident the scanner is in this finding (informational; the engine
/// does not act on it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// The normalized unit surfaced to consumers (spec.md §3 "Finding").
///
/// Findings are a subset of what each artifact embeds; the engine does not
/// interpret them beyond severity rollup (`Severity`) for the Index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub scanner: ScannerName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<FeatureName>,
    pub severity: Severity,
    pub category: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
    /// e.g. a CVE or CWE identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
}

impl Finding {
    pub fn new(
        scanner: impl Into<ScannerName>,
        severity: Severity,
        category: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            scanner: scanner.into(),
            feature: None,
            severity,
            category: category.into(),
            title: title.into(),
            location: None,
            evidence: None,
            remediation: None,
            identifier: None,
            confidence: None,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_identifier(mut self, id: impl Into<String>) -> Self {
        self.identifier = Some(id.into());
        self
    }

    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

#[cfg(test)]
#[path = "finding_tests.rs"]
mod tests;
