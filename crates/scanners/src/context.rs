// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ScanContext` / `ScanOptions`: everything a scanner's `Run` is handed
//! (spec.md §3 "Scan Options").

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use zero_core::{FeatureSet, Finding};
use zero_wire::ArtifactHeader;

use crate::error::ScannerError;
use crate::result::ScanResult;

/// Read-only access to artifacts of already-completed sibling scanners.
///
/// Implemented by `zero-store`'s artifact store; kept as a trait here so
/// `zero-scanners` never depends on the storage layer directly (spec.md §0
/// dependency direction).
pub trait SharedArtifacts: Send + Sync {
    /// The raw JSON of a completed sibling's artifact, if it has one.
    fn get_raw(&self, scanner: &str) -> Option<serde_json::Value>;

    /// The canonical CycloneDX document, present once the `sbom` scanner has
    /// completed (spec.md §3 "SBOM (special)").
    fn sbom_cyclonedx(&self) -> Option<serde_json::Value>;
}

/// An implementation with nothing recorded yet — useful for the first wave,
/// and in tests.
pub struct EmptySharedArtifacts;

impl SharedArtifacts for EmptySharedArtifacts {
    fn get_raw(&self, _scanner: &str) -> Option<serde_json::Value> {
        None
    }

    fn sbom_cyclonedx(&self) -> Option<serde_json::Value> {
        None
    }
}

/// Per-scanner feature toggles for this run (spec.md §3).
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub features: FeatureSet,
}

/// Everything the engine hands to a scanner's `Run` (spec.md §3).
pub struct ScanContext {
    /// Read-only working tree.
    pub working_tree: PathBuf,
    /// Writable; the scanner may create exactly one file here.
    pub artifact_dir: PathBuf,
    pub shared_artifacts: Arc<dyn SharedArtifacts>,
    /// Absolute time budget remaining for this scanner, from wave entry.
    pub deadline: Duration,
    pub cancel: CancellationToken,
}

impl ScanContext {
    /// Where this scanner is required to write its one artifact file.
    pub fn artifact_path(&self, scanner_name: &str) -> PathBuf {
        self.artifact_dir.join(format!("{scanner_name}.json"))
    }

    pub fn working_tree(&self) -> &Path {
        &self.working_tree
    }

    /// Write `header` to this scanner's artifact path (spec.md §3: a scanner
    /// must have written its artifact before returning `Complete`).
    ///
    /// Writes to `<name>.json.tmp-<pid>-<nonce>` then renames onto the final
    /// path, same contract `zero-store` uses for every file it owns, kept
    /// self-contained here since `zero-scanners` does not depend on the
    /// storage crate.
    pub fn write_artifact(&self, scanner_name: &str, header: &ArtifactHeader) -> Result<(), ScannerError> {
        let path = self.artifact_path(scanner_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_file_name(format!(
            "{scanner_name}.json.tmp-{}-{}",
            std::process::id(),
            nanoid::nanoid!(8)
        ));
        let bytes = serde_json::to_vec_pretty(header)?;
        {
            let mut file = File::create(&tmp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        match fs::rename(&tmp, &path) {
            Ok(()) => Ok(()),
            Err(e) => {
                let _ = fs::remove_file(&tmp);
                Err(e.into())
            }
        }
    }

    /// Write an auxiliary document into the artifact directory, atomically,
    /// alongside this scanner's own `<name>.json` (spec.md §3 "SBOM
    /// (special)": the `sbom` scanner also writes a CycloneDX document at
    /// `sbom.cdx.json`, a second well-known path every scanner declaring
    /// `sbom` as a dependency may assume is present).
    pub fn write_artifact_dir_file(&self, file_name: &str, value: &serde_json::Value) -> Result<(), ScannerError> {
        let path = self.artifact_dir.join(file_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_file_name(format!("{file_name}.tmp-{}-{}", std::process::id(), nanoid::nanoid!(8)));
        let bytes = serde_json::to_vec_pretty(value)?;
        {
            let mut file = File::create(&tmp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        match fs::rename(&tmp, &path) {
            Ok(()) => Ok(()),
            Err(e) => {
                let _ = fs::remove_file(&tmp);
                Err(e.into())
            }
        }
    }

    /// Persist `summary`/`findings` as this scanner's artifact and return the
    /// matching [`ScanResult`] — `Complete` on a successful write, `Failed`
    /// if the write itself could not be completed. Every built-in scanner
    /// funnels its successful tool invocation through this one path so the
    /// "artifact written before Complete" rule (spec.md §3) cannot be
    /// forgotten by a single collaborator.
    pub fn finish(
        &self,
        scanner_name: &str,
        summary: serde_json::Value,
        findings: Vec<Finding>,
        duration: Duration,
    ) -> ScanResult {
        let header = ArtifactHeader::new(scanner_name, chrono::Utc::now())
            .with_summary(summary.clone())
            .with_findings(findings.clone());
        match self.write_artifact(scanner_name, &header) {
            Ok(()) => ScanResult::complete(summary, findings, duration),
            Err(e) => ScanResult::failed(duration, format!("failed to write artifact: {e}")),
        }
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
