// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors the Profile Resolver can surface (spec.md §4.2: unknown profile
//! or scanner names fail fast, before any scanner runs).

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("unknown profile `{0}`")]
    UnknownProfile(String),

    #[error("override references unregistered scanner `{0}`")]
    UnknownScanner(String),
}
