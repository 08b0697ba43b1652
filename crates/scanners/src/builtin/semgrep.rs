// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Static analysis scanning, wrapping `semgrep`.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use zero_core::{Finding, Location, ScannerName, Severity};
use zero_shell::{run, Outcome, ShellCommand};

use crate::context::{ScanContext, ScanOptions};
use crate::descriptor::ScannerDescriptor;
use crate::result::ScanResult;

pub const DEFAULT_PROGRAM: &str = "semgrep";

pub struct SemgrepScanner {
    program: String,
}

impl SemgrepScanner {
    pub fn new() -> Self {
        Self { program: DEFAULT_PROGRAM.to_string() }
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }
}

impl Default for SemgrepScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(serde::Deserialize)]
struct SemgrepReport {
    #[serde(default)]
    results: Vec<SemgrepResult>,
}

#[derive(serde::Deserialize)]
struct SemgrepResult {
    #[serde(rename = "check_id")]
    check_id: String,
    path: String,
    start: SemgrepPosition,
    end: SemgrepPosition,
    extra: SemgrepExtra,
}

#[derive(serde::Deserialize)]
struct SemgrepPosition {
    line: u32,
}

#[derive(serde::Deserialize)]
struct SemgrepExtra {
    message: String,
    #[serde(default)]
    severity: Option<String>,
}

fn map_severity(raw: Option<&str>) -> Severity {
    match raw.unwrap_or("").to_uppercase().as_str() {
        "ERROR" => Severity::High,
        "WARNING" => Severity::Medium,
        "INFO" => Severity::Info,
        _ => Severity::Low,
    }
}

#[async_trait]
impl ScannerDescriptor for SemgrepScanner {
    fn name(&self) -> ScannerName {
        ScannerName::new("semgrep")
    }

    fn description(&self) -> &str {
        "runs static analysis rules against the working tree via semgrep"
    }

    fn dependencies(&self) -> BTreeSet<ScannerName> {
        BTreeSet::new()
    }

    async fn run(&self, ctx: &ScanContext, _opts: &ScanOptions) -> ScanResult {
        let start = Instant::now();
        let cmd = ShellCommand::new(&self.program)
            .arg("scan")
            .arg("--json")
            .arg("--quiet")
            .arg(ctx.working_tree().display().to_string())
            .current_dir(ctx.working_tree());

        let output = match run(&cmd, Some(ctx.deadline), ctx.cancel.clone()).await {
            Ok(output) => output,
            Err(e) => return ScanResult::failed(start.elapsed(), e.to_string()),
        };

        match output.outcome {
            // semgrep exits 1 when findings are present.
            Outcome::Exited(0) | Outcome::Exited(1) => {
                let stdout = output.stdout_snippet.clone().unwrap_or_default();
                let report: SemgrepReport = if stdout.trim().is_empty() {
                    SemgrepReport { results: Vec::new() }
                } else {
                    match serde_json::from_str(&stdout) {
                        Ok(v) => v,
                        Err(e) => return ScanResult::failed(output.duration, format!("malformed semgrep output: {e}")),
                    }
                };

                let findings: Vec<Finding> = report
                    .results
                    .into_iter()
                    .map(|r| {
                        Finding::new("semgrep", map_severity(r.extra.severity.as_deref()), "static-analysis", r.extra.message)
                            .with_identifier(r.check_id)
                            .with_location(Location::path(r.path).with_lines(r.start.line, r.end.line))
                    })
                    .collect();

                ctx.finish(
                    "semgrep",
                    serde_json::json!({ "findings_count": findings.len() }),
                    findings,
                    output.duration,
                )
            }
            Outcome::Exited(code) => ScanResult::failed(
                output.duration,
                format!("semgrep exited {code}: {}", output.stderr_snippet.unwrap_or_default()),
            ),
            Outcome::TimedOut | Outcome::Cancelled => ScanResult::cancelled(output.duration),
        }
    }
}

#[cfg(test)]
#[path = "semgrep_tests.rs"]
mod tests;
