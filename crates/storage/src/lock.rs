// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Advisory per-target locking (spec.md §4.5).
//!
//! A scan run holds the target's `.lock` file exclusively for the duration
//! of the run; readers (e.g. `Status`) may take it shared. A lock held
//! beyond [`StaleLockPolicy::threshold`] may be broken by a fresh run, after
//! logging a warning — this guards against a crashed process leaving the
//! target permanently unscannable.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use fs2::FileExt;
use tracing::warn;

use crate::error::StoreError;

#[derive(Debug, Clone, Copy)]
pub struct StaleLockPolicy {
    pub threshold: Duration,
}

impl Default for StaleLockPolicy {
    fn default() -> Self {
        Self {
            threshold: Duration::from_secs(3600),
        }
    }
}

/// A held exclusive lock on one target. Released on drop.
pub struct TargetLockGuard {
    file: File,
    path: PathBuf,
}

impl Drop for TargetLockGuard {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

fn open_lock_file(path: &Path) -> Result<File, StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?)
}

fn is_stale(path: &Path, threshold: Duration) -> bool {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|modified| SystemTime::now().duration_since(modified).ok())
        .map(|age| age >= threshold)
        .unwrap_or(false)
}

/// Acquire the exclusive lock for a target's scan run.
///
/// If the lock is currently held and has not gone stale, returns
/// [`StoreError::LockContention`]. If it has gone stale (held longer than
/// `policy.threshold`), the lock file is recreated and the caller takes
/// over, after a warning is logged.
pub fn acquire_exclusive(path: &Path, policy: StaleLockPolicy) -> Result<TargetLockGuard, StoreError> {
    let file = open_lock_file(path)?;
    match file.try_lock_exclusive() {
        Ok(()) => {
            write_pid(&file)?;
            Ok(TargetLockGuard { file, path: path.to_path_buf() })
        }
        Err(_) if is_stale(path, policy.threshold) => {
            warn!(path = %path.display(), "breaking stale lock");
            drop(file);
            std::fs::remove_file(path).ok();
            let file = open_lock_file(path)?;
            file.try_lock_exclusive()
                .map_err(|_| StoreError::LockContention { path: path.to_path_buf() })?;
            write_pid(&file)?;
            Ok(TargetLockGuard { file, path: path.to_path_buf() })
        }
        Err(_) => Err(StoreError::LockContention { path: path.to_path_buf() }),
    }
}

/// Acquire the shared lock, for operations that only read a target's state
/// (e.g. `Status`). Blocks briefly rather than failing outright; an
/// exclusive holder always releases eventually (run completion or grace
/// period abandonment).
pub fn acquire_shared(path: &Path) -> Result<TargetLockGuard, StoreError> {
    let file = open_lock_file(path)?;
    file.lock_shared()?;
    Ok(TargetLockGuard { file, path: path.to_path_buf() })
}

fn write_pid(file: &File) -> Result<(), StoreError> {
    let mut file = file;
    file.set_len(0)?;
    use std::io::Seek;
    file.seek(std::io::SeekFrom::Start(0))?;
    writeln!(file, "{}", std::process::id())?;
    file.sync_all()?;
    Ok(())
}

impl TargetLockGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
