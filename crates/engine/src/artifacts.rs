// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapts [`zero_store::SharedArtifacts`] (fallible, store-layer) to the
//! [`zero_scanners::SharedArtifacts`] trait scanners see (infallible by
//! design — a scanner cannot usefully distinguish "no such artifact" from
//! "store read failed"; both just mean the data isn't there).
//!
//! A read error is logged and treated as absence rather than propagated:
//! the scanner that depends on it will fail on its own (spec.md §4.4
//! "Failure isolation" — one collaborator's trouble should never corrupt
//! another's view of the world).

use tracing::warn;
use zero_scanners::SharedArtifacts as ScannerSharedArtifacts;
use zero_store::SharedArtifacts as StoreSharedArtifacts;

pub struct StoredArtifacts {
    inner: StoreSharedArtifacts,
}

impl StoredArtifacts {
    pub fn new(inner: StoreSharedArtifacts) -> Self {
        Self { inner }
    }
}

impl ScannerSharedArtifacts for StoredArtifacts {
    fn get_raw(&self, scanner: &str) -> Option<serde_json::Value> {
        match self.inner.get_raw(scanner) {
            Ok(value) => value,
            Err(err) => {
                warn!(scanner, %err, "failed to read sibling artifact");
                None
            }
        }
    }

    fn sbom_cyclonedx(&self) -> Option<serde_json::Value> {
        match self.inner.sbom_cyclonedx() {
            Ok(value) => value,
            Err(err) => {
                warn!(%err, "failed to read sbom.cdx.json");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "artifacts_tests.rs"]
mod tests;
