// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Driver-layer error taxonomy (spec.md §7): configuration errors fail the
//! whole process; target errors (clone failure, lock contention) are
//! surfaced per target so a multi-target `Refresh` can continue past one
//! bad target.

use std::path::PathBuf;

use zero_core::Target;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("malformed config at {path:?}: {source}")]
    MalformedConfig { path: PathBuf, source: serde_json::Error },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] zero_store::StoreError),

    #[error(transparent)]
    Engine(#[from] zero_engine::EngineError),

    #[error(transparent)]
    Profile(#[from] zero_profiles::ProfileError),

    #[error("failed to clone {target}: {reason}")]
    CloneFailed { target: Target, reason: String },

    #[error("target {target} has no working tree; hydrate it first")]
    MissingWorkingTree { target: Target },

    #[error("unknown target {target}")]
    UnknownTarget { target: Target },

    #[error("corrupt index entry {0:?}")]
    CorruptIndexEntry(String),

    #[error("failed to watch {path:?}: {source}")]
    Watch { path: PathBuf, source: notify::Error },
}
