// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency vulnerability scanning, wrapping `osv-scanner` against the
//! CycloneDX SBOM produced by the `sbom` scanner.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use zero_core::{Finding, Location, ScannerName, Severity};
use zero_shell::{run, Outcome, ShellCommand};

use crate::context::{ScanContext, ScanOptions};
use crate::descriptor::ScannerDescriptor;
use crate::error::ScannerError;
use crate::result::ScanResult;

pub const DEFAULT_PROGRAM: &str = "osv-scanner";

pub struct OsvScanner {
    program: String,
}

impl OsvScanner {
    pub fn new() -> Self {
        Self { program: DEFAULT_PROGRAM.to_string() }
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }
}

impl Default for OsvScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(serde::Deserialize)]
struct OsvReport {
    #[serde(default)]
    results: Vec<OsvResult>,
}

#[derive(serde::Deserialize)]
struct OsvResult {
    #[serde(default)]
    packages: Vec<OsvPackage>,
}

#[derive(serde::Deserialize)]
struct OsvPackage {
    package: OsvPackageInfo,
    #[serde(default)]
    vulnerabilities: Vec<OsvVulnerability>,
}

#[derive(serde::Deserialize)]
struct OsvPackageInfo {
    name: String,
    version: String,
}

#[derive(serde::Deserialize)]
struct OsvVulnerability {
    id: String,
    #[serde(default)]
    summary: Option<String>,
}

fn severity_of(vuln: &OsvVulnerability) -> Severity {
    // osv-scanner's JSON output does not carry a normalized severity field
    // uniformly across ecosystems; treat every reported advisory as a
    // candidate worth a human look rather than guess at a CVSS mapping.
    let _ = vuln;
    Severity::Medium
}

#[async_trait]
impl ScannerDescriptor for OsvScanner {
    fn name(&self) -> ScannerName {
        ScannerName::new("osv")
    }

    fn description(&self) -> &str {
        "checks the SBOM's components for known vulnerabilities via osv-scanner"
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
                    scanner: "osv".to_string(),
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
            .args(["--format", "json"])
            .args(["--sbom", &sbom_file.path().display().to_string()])
            .current_dir(ctx.working_tree());

        let output = match run(&cmd, Some(ctx.deadline), ctx.cancel.clone()).await {
            Ok(output) => output,
            Err(e) => return ScanResult::failed(start.elapsed(), e.to_string()),
        };

        match output.outcome {
            // osv-scanner exits 1 when vulnerabilities are found.
            Outcome::Exited(0) | Outcome::Exited(1) => {
                let stdout = output.stdout_snippet.clone().unwrap_or_default();
                let report: OsvReport = if stdout.trim().is_empty() {
                    OsvReport { results: Vec::new() }
                } else {
                    match serde_json::from_str(&stdout) {
                        Ok(v) => v,
                        Err(e) => {
                            return ScanResult::failed(output.duration, format!("malformed osv-scanner report: {e}"))
                        }
                    }
                };

                let findings: Vec<Finding> = report
                    .results
                    .into_iter()
                    .flat_map(|r| r.packages)
                    .flat_map(|pkg| {
                        let location = Location::path(format!("{}@{}", pkg.package.name, pkg.package.version));
                        pkg.vulnerabilities.into_iter().map(move |vuln| {
                            Finding::new(
                                "osv",
                                severity_of(&vuln),
                                "vulnerable-dependency",
                                vuln.summary.clone().unwrap_or_else(|| vuln.id.clone()),
                            )
                            .with_identifier(vuln.id)
                            .with_location(location.clone())
                        })
                    })
                    .collect();

                ctx.finish(
                    "osv",
                    serde_json::json!({ "vulnerabilities_found": findings.len() }),
                    findings,
                    output.duration,
                )
            }
            Outcome::Exited(code) => ScanResult::failed(
                output.duration,
                format!("osv-scanner exited {code}: {}", output.stderr_snippet.unwrap_or_default()),
            ),
            Outcome::TimedOut | Outcome::Cancelled => ScanResult::cancelled(output.duration),
        }
    }
}

#[cfg(test)]
#[path = "osv_tests.rs"]
mod tests;
