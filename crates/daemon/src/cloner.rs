// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Cloner collaborator (spec.md §6): "Receives `{owner, repo,
//! destination path}`, produces a working tree, signals success/failure.
//! The engine neither performs authentication nor manages credentials; the
//! cloner is responsible."
//!
//! spec.md specifies this contract but not an implementation; this crate
//! supplies [`GitCloner`] (shells out to `git clone` via `zero-shell`) and
//! [`FakeCloner`] (test-support) so `Hydrate` is exercisable end-to-end.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use zero_core::Target;
use zero_shell::ShellCommand;

use crate::error::DriverError;

#[async_trait]
pub trait Cloner: Send + Sync {
    /// Produce a working tree for `target` at `destination`, returning once
    /// it is ready for scanners to read. The engine performs no
    /// authentication or credential handling of its own; that is entirely
    /// this collaborator's concern.
    async fn clone(&self, target: &Target, destination: &Path) -> Result<(), DriverError>;
}

/// Shells out to `git clone` over HTTPS, matching spec.md §6's "produce a
/// working tree" minimum — credential handling (if any) is expected to live
/// in the ambient `git` configuration or credential helper, not here.
pub struct GitCloner {
    base_url: String,
}

impl GitCloner {
    pub fn new() -> Self {
        Self { base_url: "https://github.com".to_string() }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }
}

impl Default for GitCloner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cloner for GitCloner {
    async fn clone(&self, target: &Target, destination: &Path) -> Result<(), DriverError> {
        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let url = format!("{}/{}/{}.git", self.base_url, target.owner, target.repo);
        let cmd = ShellCommand::new("git")
            .arg("clone")
            .arg("--depth")
            .arg("1")
            .arg(&url)
            .arg(destination.to_string_lossy().into_owned());
        let output = zero_shell::run(&cmd, None, tokio_util::sync::CancellationToken::new())
            .await
            .map_err(|err| DriverError::CloneFailed { target: target.clone(), reason: err.to_string() })?;
        if !output.outcome.is_success() {
            return Err(DriverError::CloneFailed {
                target: target.clone(),
                reason: output.stderr_snippet.unwrap_or_else(|| format!("{:?}", output.outcome)),
            });
        }
        Ok(())
    }
}

/// Materializes an empty directory instead of actually cloning — for tests
/// that exercise `Hydrate`'s orchestration without a network dependency.
pub struct FakeCloner {
    pub seed_files: Vec<PathBuf>,
}

impl FakeCloner {
    pub fn new() -> Self {
        Self { seed_files: Vec::new() }
    }
}

impl Default for FakeCloner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cloner for FakeCloner {
    async fn clone(&self, _target: &Target, destination: &Path) -> Result<(), DriverError> {
        std::fs::create_dir_all(destination)?;
        for relative in &self.seed_files {
            let path = destination.join(relative);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, b"")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "cloner_tests.rs"]
mod tests;
