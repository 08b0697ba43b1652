// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! zero-store: the Artifact Store (spec.md §4.5).
//!
//! Owns the on-disk layout, atomic writes, per-target advisory locking, the
//! manifest and freshness-cache read-modify-write protocol, and the
//! process-home index. Nothing above this crate should touch the filesystem
//! directly — `zero-engine` and `zero-daemon` call through here.

pub mod artifacts;
pub mod atomic;
pub mod clean;
pub mod error;
pub mod freshness_cache;
pub mod index_store;
pub mod layout;
pub mod lock;
pub mod manifest;

pub use artifacts::SharedArtifacts;
pub use clean::clean_target;
pub use error::StoreError;
pub use freshness_cache::FreshnessCache;
pub use layout::Layout;
pub use lock::{acquire_exclusive, acquire_shared, StaleLockPolicy, TargetLockGuard};
