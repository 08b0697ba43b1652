// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ScanResult`: the output of one scanner's `Run` (spec.md §3).

use std::time::Duration;

use zero_core::{Finding, ScanStatus};

#[derive(Debug, Clone)]
pub struct ScanResult {
    pub status: ScanStatus,
    pub summary: serde_json::Value,
    pub findings: Vec<Finding>,
    pub duration: Duration,
    pub error: Option<String>,
}

impl ScanResult {
    pub fn complete(summary: serde_json::Value, findings: Vec<Finding>, duration: Duration) -> Self {
        Self {
            status: ScanStatus::Complete,
            summary,
            findings,
            duration,
            error: None,
        }
    }

    pub fn failed(duration: Duration, error: impl Into<String>) -> Self {
        Self {
            status: ScanStatus::Failed,
            summary: serde_json::Value::Object(serde_json::Map::new()),
            findings: Vec::new(),
            duration,
            error: Some(error.into()),
        }
    }

    pub fn cancelled(duration: Duration) -> Self {
        Self {
            status: ScanStatus::Cancelled,
            summary: serde_json::Value::Object(serde_json::Map::new()),
            findings: Vec::new(),
            duration,
            error: None,
        }
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
