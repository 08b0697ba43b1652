// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-home-level index (`index.json`), updated atomically at scan end
//! (spec.md §3, §4.8).

use std::path::Path;

use zero_wire::{Index, IndexEntry};

use crate::atomic::{read_json, write_json_atomic};
use crate::error::StoreError;

pub fn read_index(path: &Path) -> Result<Index, StoreError> {
    Ok(read_json(path)?.unwrap_or_default())
}

pub fn write_index(path: &Path, index: &Index) -> Result<(), StoreError> {
    write_json_atomic(path, index)
}

/// Read-modify-write one target's row into the index at `path`.
pub fn upsert_target(path: &Path, slug: &str, entry: IndexEntry) -> Result<Index, StoreError> {
    let mut index = read_index(path)?;
    index.upsert(slug, entry);
    write_index(path, &index)?;
    Ok(index)
}

/// Remove a target's row, for the `Clean` driver operation.
pub fn remove_target(path: &Path, slug: &str) -> Result<Index, StoreError> {
    let mut index = read_index(path)?;
    index.remove(slug);
    write_index(path, &index)?;
    Ok(index)
}

#[cfg(test)]
#[path = "index_store_tests.rs"]
mod tests;
