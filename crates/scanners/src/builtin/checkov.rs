// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Infrastructure-as-code scanning, wrapping `checkov`.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use zero_core::{Finding, Location, ScannerName, Severity};
use zero_shell::{run, Outcome, ShellCommand};

use crate::context::{ScanContext, ScanOptions};
use crate::descriptor::ScannerDescriptor;
use crate::result::ScanResult;

pub const DEFAULT_PROGRAM: &str = "checkov";

pub struct CheckovScanner {
    program: String,
}

impl CheckovScanner {
    pub fn new() -> Self {
        Self { program: DEFAULT_PROGRAM.to_string() }
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }
}

impl Default for CheckovScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(serde::Deserialize)]
struct CheckovReport {
    #[serde(default)]
    results: Option<CheckovResults>,
}

#[derive(serde::Deserialize)]
struct CheckovResults {
    #[serde(default, rename = "failed_checks")]
    failed_checks: Vec<CheckovCheck>,
}

#[derive(serde::Deserialize)]
struct CheckovCheck {
    check_id: String,
    check_name: String,
    file_path: String,
    #[serde(default)]
    file_line_range: Option<[u32; 2]>,
    #[serde(default)]
    severity: Option<String>,
}

fn map_severity(raw: Option<&str>) -> Severity {
    match raw.unwrap_or("").to_uppercase().as_str() {
        "CRITICAL" => Severity::Critical,
        "HIGH" => Severity::High,
        "MEDIUM" => Severity::Medium,
        "LOW" => Severity::Low,
        // checkov frequently omits severity on its built-in checks; surface
        // those as a finding that still needs a look rather than drop them.
        _ => Severity::Medium,
    }
}

#[async_trait]
impl ScannerDescriptor for CheckovScanner {
    fn name(&self) -> ScannerName {
        ScannerName::new("checkov")
    }

    fn description(&self) -> &str {
        "scans infrastructure-as-code for misconfigurations via checkov"
    }

    fn dependencies(&self) -> BTreeSet<ScannerName> {
        BTreeSet::new()
    }

    async fn run(&self, ctx: &ScanContext, _opts: &ScanOptions) -> ScanResult {
        let start = Instant::now();
        let cmd = ShellCommand::new(&self.program)
            .args(["-d", &ctx.working_tree().display().to_string()])
            .args(["-o", "json"])
            .arg("--soft-fail")
            .current_dir(ctx.working_tree());

        let output = match run(&cmd, Some(ctx.deadline), ctx.cancel.clone()).await {
            Ok(output) => output,
            Err(e) => return ScanResult::failed(start.elapsed(), e.to_string()),
        };

        match output.outcome {
            Outcome::Exited(0) => {
                let stdout = output.stdout_snippet.clone().unwrap_or_default();
                let report: CheckovReport = if stdout.trim().is_empty() {
                    CheckovReport { results: None }
                } else {
                    match serde_json::from_str(&stdout) {
                        Ok(v) => v,
                        Err(e) => return ScanResult::failed(output.duration, format!("malformed checkov output: {e}")),
                    }
                };

                let findings: Vec<Finding> = report
                    .results
                    .map(|r| r.failed_checks)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|c| {
                        let [start_line, end_line] = c.file_line_range.unwrap_or([0, 0]);
                        Finding::new("checkov", map_severity(c.severity.as_deref()), "misconfiguration", c.check_name)
                            .with_identifier(c.check_id)
                            .with_location(Location::path(c.file_path).with_lines(start_line, end_line))
                    })
                    .collect();

                ctx.finish(
                    "checkov",
                    serde_json::json!({ "failed_checks": findings.len() }),
                    findings,
                    output.duration,
                )
            }
            Outcome::Exited(code) => ScanResult::failed(
                output.duration,
                format!("checkov exited {code}: {}", output.stderr_snippet.unwrap_or_default()),
            ),
            Outcome::TimedOut | Outcome::Cancelled => ScanResult::cancelled(output.duration),
        }
    }
}

#[cfg(test)]
#[path = "checkov_tests.rs"]
mod tests;
