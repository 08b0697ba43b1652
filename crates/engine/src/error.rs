// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine-layer error taxonomy (spec.md §7: "Configuration errors" and the
//! planner/registry's share of "Target errors").

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("scanner `{0}` is already registered")]
    DuplicateScanner(String),

    #[error("scanner `{scanner}` depends on unregistered scanner `{dependency}`")]
    DanglingDependency { scanner: String, dependency: String },

    #[error("dependency cycle detected involving scanner `{0}`")]
    DependencyCycle(String),

    #[error(transparent)]
    Profile(#[from] zero_profiles::ProfileError),

    #[error(transparent)]
    Store(#[from] zero_store::StoreError),
}
