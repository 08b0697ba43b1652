// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Vulnerability scanning over the SBOM's component inventory, wrapping
//! `trivy sbom`.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use zero_core::{Finding, Location, ScannerName, Severity};
use zero_shell::{run, Outcome, ShellCommand};

use crate::context::{ScanContext, ScanOptions};
use crate::descriptor::ScannerDescriptor;
use crate::error::ScannerError;
use crate::result::ScanResult;

pub const DEFAULT_PROGRAM: &str = "trivy";

pub struct TrivyScanner {
    program: String,
}

impl TrivyScanner {
    pub fn new() -> Self {
        Self { program: DEFAULT_PROGRAM.to_string() }
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }
}

impl Default for TrivyScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(serde::Deserialize)]
struct TrivyReport {
    #[serde(default, rename = "Results")]
    results: Vec<TrivyResult>,
}

#[derive(serde::Deserialize)]
struct TrivyResult {
    #[serde(rename = "Target")]
    target: String,
    #[serde(default, rename = "Vulnerabilities")]
    vulnerabilities: Vec<TrivyVulnerability>,
}

#[derive(serde::Deserialize)]
struct TrivyVulnerability {
    #[serde(rename = "VulnerabilityID")]
    vulnerability_id: String,
    #[serde(default, rename = "Title")]
    title: Option<String>,
    #[serde(default, rename = "Severity")]
    severity: Option<String>,
    #[serde(rename = "PkgName")]
    pkg_name: String,
    #[serde(rename = "InstalledVersion")]
    installed_version: String,
}

fn map_severity(raw: Option<&str>) -> Severity {
    match raw.unwrap_or("").to_uppercase().as_str() {
        "CRITICAL" => Severity::Critical,
        "HIGH" => Severity::High,
        "MEDIUM" => Severity::Medium,
        "LOW" => Severity::Low,
        _ => Severity::Info,
    }
}

#[async_trait]
impl ScannerDescriptor for TrivyScanner {
    fn name(&self) -> ScannerName {
        ScannerName::new("trivy")
    }

    fn description(&self) -> &str {
        "checks the SBOM's components for known vulnerabilities via trivy"
    }

    fn dependencies(&self) -> BTreeSet<ScannerName> {
        BTreeSet::from([ScannerName::new("sbom")])
    }

    async fn run(&self, ctx: &ScanContext, _opts: &ScanOptions) -> ScanResult {
        let start = Instant::now();

        let sbom = match ctx.shared_artifacts.sbom_cyclonedx() {
            Some(sbom) => sbom,
            None => {
                let err = ScannerError::MissingDependencyArtifact {
                    scanner: "trivy".to_string(),
                    dependency: "sbom".to_string(),
                };
                return ScanResult::failed(start.elapsed(), err.to_string());
            }
        };

        let sbom_file = match tempfile::NamedTempFile::new() {
            Ok(f) => f,
            Err(e) => return ScanResult::failed(start.elapsed(), e.to_string()),
        };
        if let Err(e) = std::fs::write(sbom_file.path(), sbom.to_string()) {
            return ScanResult::failed(start.elapsed(), e.to_string());
        }

        let cmd = ShellCommand::new(&self.program)
            .arg("sbom")
            .args(["--format", "json"])
            .arg(sbom_file.path().display().to_string())
            .current_dir(ctx.working_tree());

        let output = match run(&cmd, Some(ctx.deadline), ctx.cancel.clone()).await {
            Ok(output) => output,
            Err(e) => return ScanResult::failed(start.elapsed(), e.to_string()),
        };

        match output.outcome {
            Outcome::Exited(0) => {
                let stdout = output.stdout_snippet.clone().unwrap_or_default();
                let report: TrivyReport = if stdout.trim().is_empty() {
                    TrivyReport { results: Vec::new() }
                } else {
                    match serde_json::from_str(&stdout) {
                        Ok(v) => v,
                        Err(e) => return ScanResult::failed(output.duration, format!("malformed trivy output: {e}")),
                    }
                };

                let findings: Vec<Finding> = report
                    .results
                    .into_iter()
                    .flat_map(|result| {
                        let target = result.target;
                        result.vulnerabilities.into_iter().map(move |v| {
                            Finding::new(
                                "trivy",
                                map_severity(v.severity.as_deref()),
                                "vulnerable-dependency",
                                v.title.unwrap_or_else(|| v.vulnerability_id.clone()),
                            )
                            .with_identifier(v.vulnerability_id)
                            .with_location(Location::path(format!(
                                "{target}:{}@{}",
                                v.pkg_name, v.installed_version
                            )))
                        })
                    })
                    .collect();

                ctx.finish(
                    "trivy",
                    serde_json::json!({ "vulnerabilities_found": findings.len() }),
                    findings,
                    output.duration,
                )
            }
            Outcome::Exited(code) => ScanResult::failed(
                output.duration,
                format!("trivy exited {code}: {}", output.stderr_snippet.unwrap_or_default()),
            ),
            Outcome::TimedOut | Outcome::Cancelled => ScanResult::cancelled(output.duration),
        }
    }
}

#[cfg(test)]
#[path = "trivy_tests.rs"]
mod tests;
