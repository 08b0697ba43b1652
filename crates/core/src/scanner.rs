// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scanner and feature identifiers, and scan terminal-state vocabulary.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::collections::BTreeSet;
use std::fmt;

/// Stable, unique name of a registered scanner (e.g. `"sbom"`, `"osv"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScannerName(SmolStr);

impl ScannerName {
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(SmolStr::new(s.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ScannerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<&str> for ScannerName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ScannerName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl std::borrow::Borrow<str> for ScannerName {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

/// A sub-mode of a scanner (e.g. `vulns`, `licenses`, `malcontent`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureName(SmolStr);

impl FeatureName {
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(SmolStr::new(s.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<&str> for FeatureName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The set of features enabled for one scanner within an execution request.
///
/// An empty set means "run with the scanner's default feature set" (spec.md
/// §4.2 edge case): the Scanner Registry's descriptor, not this type, owns
/// what "default" means for a given scanner.
pub type FeatureSet = BTreeSet<FeatureName>;

/// Terminal (or pending) status of one scanner within a scan generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ScanStatus {
    Pending,
    Complete,
    Failed,
    Skipped,
    Cancelled,
}

crate::simple_display! {
    ScanStatus {
        Pending => "Pending",
        Complete => "Complete",
        Failed => "Failed",
        Skipped => "Skipped",
        Cancelled => "Cancelled",
    }
}

impl ScanStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, ScanStatus::Pending)
    }
}

/// Why a scanner ended up in a non-`Complete` terminal state.
///
/// Kept as a small closed vocabulary plus an `Other` escape hatch rather than
/// a bare `String`, so the scheduler and store can match on well-known
/// reasons (`dependency-failed` drives the planner's skip logic) while still
/// round-tripping whatever a scanner collaborator reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ExitReason {
    DependencyFailed,
    MissingArtifact,
    Timeout,
    Panic,
    Cancelled,
    Other(String),
}

impl ExitReason {
    pub fn as_str(&self) -> &str {
        match self {
            ExitReason::DependencyFailed => "dependency-failed",
            ExitReason::MissingArtifact => "missing-artifact",
            ExitReason::Timeout => "timeout",
            ExitReason::Panic => "panic",
            ExitReason::Cancelled => "cancelled",
            ExitReason::Other(s) => s,
        }
    }
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ExitReason {
    fn from(s: &str) -> Self {
        match s {
            "dependency-failed" => ExitReason::DependencyFailed,
            "missing-artifact" => ExitReason::MissingArtifact,
            "timeout" => ExitReason::Timeout,
            "panic" => ExitReason::Panic,
            "cancelled" => ExitReason::Cancelled,
            other => ExitReason::Other(other.to_string()),
        }
    }
}

impl From<String> for ExitReason {
    fn from(s: String) -> Self {
        ExitReason::from(s.as_str())
    }
}

impl From<ExitReason> for String {
    fn from(r: ExitReason) -> Self {
        r.as_str().to_string()
    }
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;
