// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution error types.

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("failed to spawn `{command}`: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting on `{command}`: {source}")]
    WaitFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to kill `{command}` after cancellation: {source}")]
    KillFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}
