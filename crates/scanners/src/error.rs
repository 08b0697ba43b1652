// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors a scanner collaborator's `Run` can surface.
//!
//! These are distinct from a `Failed` [`crate::result::ScanResult`]: a
//! scanner can run to completion and still report `Failed` (e.g. the tool
//! it wraps exited non-zero). A [`ScannerError`] means `Run` itself could
//! not execute — it is converted to `Failed` with an `Other` exit reason by
//! the caller rather than propagated, so one misbehaving scanner can never
//! abort a run (spec.md §4.4 "Failure isolation").

#[derive(Debug, thiserror::Error)]
pub enum ScannerError {
    #[error("subprocess error: {0}")]
    Shell(#[from] zero_shell::ShellError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tool output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("required sibling artifact `{dependency}` missing for `{scanner}`")]
    MissingDependencyArtifact { scanner: String, dependency: String },
}
