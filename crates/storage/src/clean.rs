// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Clean` driver operation: removes a target's subtree and index entry
//! (spec.md §6).

use zero_core::Target;

use crate::error::StoreError;
use crate::index_store;
use crate::layout::Layout;

pub fn clean_target(layout: &Layout, target: &Target) -> Result<(), StoreError> {
    let dir = layout.target_dir(target);
    if dir.exists() {
        std::fs::remove_dir_all(&dir)?;
    }
    index_store::remove_target(&layout.index_path(), &target.slug())?;
    Ok(())
}

#[cfg(test)]
#[path = "clean_tests.rs"]
mod tests;
