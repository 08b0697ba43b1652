// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Manifest read/write (spec.md §4.5: "written twice per run... per-scanner
//! entries additionally flushed as each scanner terminates, by
//! read-modify-write of the manifest under the exclusive lock").

use std::path::Path;

use zero_wire::Manifest;

use crate::atomic::{read_json, write_json_atomic};
use crate::error::StoreError;

pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<(), StoreError> {
    write_json_atomic(path, manifest)
}

pub fn read_manifest(path: &Path) -> Result<Option<Manifest>, StoreError> {
    read_json(path)
}

/// Read-modify-write one scanner's entry into the manifest at `path`.
///
/// Callers are expected to hold the target's exclusive lock for the
/// duration of this call (spec.md §4.5).
pub fn update_scanner_entry(
    path: &Path,
    scanner: &str,
    update: impl FnOnce(&mut zero_wire::ScannerEntry),
) -> Result<Manifest, StoreError> {
    let mut manifest = read_manifest(path)?
        .ok_or_else(|| StoreError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "manifest missing")))?;
    let entry = manifest
        .scanners
        .entry(scanner.to_string())
        .or_insert_with(zero_wire::ScannerEntry::pending);
    update(entry);
    write_manifest(path, &manifest)?;
    Ok(manifest)
}

#[cfg(test)]
#[path = "manifest_store_tests.rs"]
mod tests;
