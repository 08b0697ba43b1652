// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! zero-core: domain types shared across the Zero scanner orchestration engine.
//!
//! This crate is deliberately inert: it has no filesystem, process, or
//! network access. It defines the vocabulary (`Target`, `ScannerName`,
//! `Finding`, `Severity`, `Freshness`, …) that every other crate in the
//! workspace builds on, plus the `Clock` abstraction used to keep scheduling
//! and freshness logic testable.

pub mod macros;

pub mod clock;
pub mod finding;
pub mod freshness;
pub mod ids;
pub mod scanner;
pub mod severity;
pub mod target;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use finding::{Confidence, Finding, Location};
pub use freshness::{Freshness, FreshnessThresholds};
pub use ids::ScanId;
pub use scanner::{ExitReason, FeatureName, FeatureSet, ScanStatus, ScannerName};
pub use severity::{Severity, SeverityRollup};
pub use target::{Target, TargetParseError};
pub use time_fmt::{format_elapsed, format_elapsed_ms};
