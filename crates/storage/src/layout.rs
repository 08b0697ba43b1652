// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk layout (spec.md §4.5):
//!
//! ```text
//! <home>/
//!   index.json
//!   repos/<owner>/<repo>/
//!     project.json
//!     repo/                  -- cloned working tree
//!     analysis/
//!       manifest.json
//!       freshness.json
//!       <scanner>.json
//!       sbom.cdx.json
//!     .lock                  -- per-target advisory lock
//! ```

use std::path::{Path, PathBuf};
use zero_core::Target;

/// Resolves every path the store touches, rooted at one process home
/// directory.
#[derive(Debug, Clone)]
pub struct Layout {
    home: PathBuf,
}

impl Layout {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn index_path(&self) -> PathBuf {
        self.home.join("index.json")
    }

    pub fn target_dir(&self, target: &Target) -> PathBuf {
        self.home.join("repos").join(&target.owner).join(&target.repo)
    }

    pub fn project_path(&self, target: &Target) -> PathBuf {
        self.target_dir(target).join("project.json")
    }

    pub fn working_tree_dir(&self, target: &Target) -> PathBuf {
        self.target_dir(target).join("repo")
    }

    pub fn analysis_dir(&self, target: &Target) -> PathBuf {
        self.target_dir(target).join("analysis")
    }

    pub fn manifest_path(&self, target: &Target) -> PathBuf {
        self.analysis_dir(target).join("manifest.json")
    }

    pub fn freshness_path(&self, target: &Target) -> PathBuf {
        self.analysis_dir(target).join("freshness.json")
    }

    pub fn artifact_path(&self, target: &Target, scanner: &str) -> PathBuf {
        self.analysis_dir(target).join(format!("{scanner}.json"))
    }

    pub fn sbom_cdx_path(&self, target: &Target) -> PathBuf {
        self.analysis_dir(target).join("sbom.cdx.json")
    }

    pub fn lock_path(&self, target: &Target) -> PathBuf {
        self.target_dir(target).join(".lock")
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
