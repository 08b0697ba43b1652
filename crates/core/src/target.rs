// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Target identity — the logical subject of a scan.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A GitHub repository identified by `{owner, repo}`.
///
/// Identity only; a [`Target`] carries no state about whether it has been
/// scanned. That lives in the manifest and index (see `zero-store`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Target {
    pub owner: String,
    pub repo: String,
}

impl Target {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self { owner: owner.into(), repo: repo.into() }
    }

    /// The `owner/repo` slug used as an index key and directory path segment.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Error parsing a `owner/repo` string into a [`Target`].
#[derive(Debug, thiserror::Error)]
#[error("invalid target {0:?}: expected \"owner/repo\"")]
pub struct TargetParseError(String);

impl FromStr for Target {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (owner, repo) = s.split_once('/').ok_or_else(|| TargetParseError(s.to_string()))?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(TargetParseError(s.to_string()));
        }
        Ok(Target::new(owner, repo))
    }
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
