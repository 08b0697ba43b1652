// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only view of already-completed sibling artifacts, handed to a
//! scanner's `Run` via `ScanOptions.SharedArtifacts` (spec.md §3, §4.4).
//!
//! Artifacts of scanners in earlier waves are visible; a wave's scanners
//! must not read each other's artifacts (spec.md §4.6) — the caller is
//! responsible for constructing a [`SharedArtifacts`] scoped to scanners
//! that have already reached `Complete`, not for enforcing that here.

use std::path::PathBuf;

use crate::error::StoreError;
use zero_wire::ArtifactHeader;

#[derive(Debug, Clone)]
pub struct SharedArtifacts {
    analysis_dir: PathBuf,
}

impl SharedArtifacts {
    pub fn new(analysis_dir: impl Into<PathBuf>) -> Self {
        Self { analysis_dir: analysis_dir.into() }
    }

    /// Read a completed sibling scanner's artifact header, if present.
    pub fn get(&self, scanner: &str) -> Result<Option<ArtifactHeader>, StoreError> {
        crate::atomic::read_json(&self.analysis_dir.join(format!("{scanner}.json")))
    }

    /// Read the whole artifact as a raw JSON value, including scanner-defined
    /// fields the engine doesn't know about.
    pub fn get_raw(&self, scanner: &str) -> Result<Option<serde_json::Value>, StoreError> {
        crate::atomic::read_json(&self.analysis_dir.join(format!("{scanner}.json")))
    }

    /// Present iff the `sbom` scanner has completed (spec.md §3 "SBOM
    /// (special)"): the canonical CycloneDX document.
    pub fn sbom_cyclonedx(&self) -> Result<Option<serde_json::Value>, StoreError> {
        crate::atomic::read_json(&self.analysis_dir.join("sbom.cdx.json"))
    }
}

#[cfg(test)]
#[path = "artifacts_tests.rs"]
mod tests;
