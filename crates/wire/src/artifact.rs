// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The engine-owned header every `<scanner>.json` artifact must carry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zero_core::Finding;

/// Top-level fields the engine requires of every scanner's output file.
///
/// Scanners are free to add further top-level fields; the engine reads
/// these four and ignores the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactHeader {
    pub scanner: String,
    pub generated_at: DateTime<Utc>,
    #[serde(default = "default_summary")]
    pub summary: serde_json::Value,
    #[serde(default)]
    pub findings: Vec<Finding>,
}

fn default_summary() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl ArtifactHeader {
    pub fn new(scanner: impl Into<String>, generated_at: DateTime<Utc>) -> Self {
        Self {
            scanner: scanner.into(),
            generated_at,
            summary: default_summary(),
            findings: Vec::new(),
        }
    }

    pub fn with_findings(mut self, findings: Vec<Finding>) -> Self {
        self.findings = findings;
        self
    }

    pub fn with_summary(mut self, summary: serde_json::Value) -> Self {
        self.summary = summary;
        self
    }
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
