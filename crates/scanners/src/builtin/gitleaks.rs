// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Secret scanning, wrapping `gitleaks`.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use zero_core::{Confidence, Finding, Location, ScannerName, Severity};
use zero_shell::{run, Outcome, ShellCommand};

use crate::context::{ScanContext, ScanOptions};
use crate::descriptor::ScannerDescriptor;
use crate::result::ScanResult;

pub const DEFAULT_PROGRAM: &str = "gitleaks";

pub struct GitleaksScanner {
    program: String,
}

impl GitleaksScanner {
    pub fn new() -> Self {
        Self { program: DEFAULT_PROGRAM.to_string() }
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }
}

impl Default for GitleaksScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(serde::Deserialize)]
struct GitleaksFinding {
    #[serde(rename = "RuleID")]
    rule_id: String,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "File")]
    file: String,
    #[serde(rename = "StartLine")]
    start_line: Option<u32>,
    #[serde(rename = "EndLine")]
    end_line: Option<u32>,
}

#[async_trait]
impl ScannerDescriptor for GitleaksScanner {
    fn name(&self) -> ScannerName {
        ScannerName::new("gitleaks")
    }

    fn description(&self) -> &str {
        "scans the working tree for committed secrets via gitleaks"
    }

    fn dependencies(&self) -> BTreeSet<ScannerName> {
        BTreeSet::new()
    }

    async fn run(&self, ctx: &ScanContext, _opts: &ScanOptions) -> ScanResult {
        let start = Instant::now();
        let report = match tempfile::NamedTempFile::new() {
            Ok(f) => f,
            Err(e) => return ScanResult::failed(start.elapsed(), e.to_string()),
        };

        let cmd = ShellCommand::new(&self.program)
            .arg("detect")
            .args(["--source", &ctx.working_tree().display().to_string()])
            .args(["--report-format", "json"])
            .args(["--report-path", &report.path().display().to_string()])
            .arg("--no-git")
            .current_dir(ctx.working_tree());

        let output = match run(&cmd, Some(ctx.deadline), ctx.cancel.clone()).await {
            Ok(output) => output,
            Err(e) => return ScanResult::failed(start.elapsed(), e.to_string()),
        };

        match output.outcome {
            // gitleaks exits 1 when leaks are found; that is a successful scan.
            Outcome::Exited(0) | Outcome::Exited(1) => {
                let bytes = std::fs::read(report.path()).unwrap_or_default();
                let raw: Vec<GitleaksFinding> = if bytes.is_empty() {
                    Vec::new()
                } else {
                    match serde_json::from_slice(&bytes) {
                        Ok(v) => v,
                        Err(e) => {
                            return ScanResult::failed(output.duration, format!("malformed gitleaks report: {e}"))
                        }
                    }
                };

                let findings: Vec<Finding> = raw
                    .into_iter()
                    .map(|f| {
                        Finding::new("gitleaks", Severity::High, "secret", f.description)
                            .with_identifier(f.rule_id)
                            .with_location(
                                Location::path(f.file).with_optional_lines(f.start_line, f.end_line),
                            )
                            .with_confidence(Confidence::Medium)
                    })
                    .collect();

                ctx.finish(
                    "gitleaks",
                    serde_json::json!({ "leaks_found": findings.len() }),
                    findings,
                    output.duration,
                )
            }
            Outcome::Exited(code) => ScanResult::failed(
                output.duration,
                format!("gitleaks exited {code}: {}", output.stderr_snippet.unwrap_or_default()),
            ),
            Outcome::TimedOut | Outcome::Cancelled => ScanResult::cancelled(output.duration),
        }
    }
}

#[cfg(test)]
#[path = "gitleaks_tests.rs"]
mod tests;
