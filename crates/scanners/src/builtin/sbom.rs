// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The canonical SBOM producer (spec.md §3 "SBOM (special)"). Wraps
//! `syft`, emitting a CycloneDX document as its `summary`; the engine
//! persists that document at the well-known `sbom.cdx.json` path so any
//! scanner declaring `sbom` as a dependency can assume its presence.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use zero_core::ScannerName;
use zero_shell::{run, Outcome, ShellCommand};

use crate::context::{ScanContext, ScanOptions};
use crate::descriptor::ScannerDescriptor;
use crate::result::ScanResult;

/// Default external tool this scanner wraps.
pub const DEFAULT_PROGRAM: &str = "syft";

pub struct SbomScanner {
    program: String,
}

impl SbomScanner {
    pub fn new() -> Self {
        Self { program: DEFAULT_PROGRAM.to_string() }
    }

    /// Override the binary invoked, e.g. to substitute a stub in tests.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }
}

impl Default for SbomScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScannerDescriptor for SbomScanner {
    fn name(&self) -> ScannerName {
        ScannerName::new("sbom")
    }

    fn description(&self) -> &str {
        "produces the canonical CycloneDX software bill of materials via syft"
    }

    fn dependencies(&self) -> BTreeSet<ScannerName> {
        BTreeSet::new()
    }

    fn estimate_duration(&self, file_count: u64) -> Duration {
        Duration::from_secs(5 + file_count / 200)
    }

    async fn run(&self, ctx: &ScanContext, _opts: &ScanOptions) -> ScanResult {
        let start = Instant::now();
        let cmd = ShellCommand::new(&self.program)
            .arg(ctx.working_tree().display().to_string())
            .args(["-o", "cyclonedx-json"])
            .current_dir(ctx.working_tree());

        let output = match run(&cmd, Some(ctx.deadline), ctx.cancel.clone()).await {
            Ok(output) => output,
            Err(e) => return ScanResult::failed(start.elapsed(), e.to_string()),
        };

        match output.outcome {
            Outcome::Exited(0) => {
                let stdout = output.stdout_snippet.clone().unwrap_or_default();
                match serde_json::from_str::<serde_json::Value>(&stdout) {
                    Ok(cyclonedx) => {
                        // Write the well-known CycloneDX document first:
                        // any scanner declaring `sbom` as a dependency may
                        // assume it exists once this scanner is `Complete`
                        // (spec.md §3 "SBOM (special)").
                        if let Err(e) = ctx.write_artifact_dir_file("sbom.cdx.json", &cyclonedx) {
                            return ScanResult::failed(output.duration, format!("failed to write sbom.cdx.json: {e}"));
                        }
                        let component_count = cyclonedx
                            .get("components")
                            .and_then(|c| c.as_array())
                            .map(|a| a.len())
                            .unwrap_or(0);
                        ctx.finish(
                            "sbom",
                            serde_json::json!({
                                "cyclonedx": cyclonedx,
                                "component_count": component_count,
                            }),
                            Vec::new(),
                            output.duration,
                        )
                    }
                    Err(e) => ScanResult::failed(output.duration, format!("malformed syft output: {e}")),
                }
            }
            Outcome::Exited(code) => ScanResult::failed(
                output.duration,
                format!("syft exited {code}: {}", output.stderr_snippet.unwrap_or_default()),
            ),
            Outcome::TimedOut | Outcome::Cancelled => ScanResult::cancelled(output.duration),
        }
    }
}

#[cfg(test)]
#[path = "sbom_tests.rs"]
mod tests;
