// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A scripted [`ScannerDescriptor`] for exercising the planner and scheduler
//! without shelling out to a real tool (`test-support` feature).

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use zero_core::ScannerName;

use crate::context::{ScanContext, ScanOptions};
use crate::descriptor::ScannerDescriptor;
use crate::result::ScanResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FakeOutcome {
    Complete,
    Failed,
    /// Sleeps past its context's deadline instead of returning, so tests can
    /// exercise scheduler-driven timeouts.
    Hang,
}

/// A scanner whose dependencies, outcome, and artificial delay are all set
/// up front, for deterministic planner/scheduler tests.
pub struct FakeScanner {
    name: ScannerName,
    dependencies: BTreeSet<ScannerName>,
    outcome: FakeOutcome,
    delay: Duration,
    run_count: Arc<AtomicUsize>,
}

impl FakeScanner {
    pub fn new(name: impl Into<ScannerName>) -> Self {
        Self {
            name: name.into(),
            dependencies: BTreeSet::new(),
            outcome: FakeOutcome::Complete,
            delay: Duration::ZERO,
            run_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn depends_on(mut self, names: impl IntoIterator<Item = &'static str>) -> Self {
        self.dependencies = names.into_iter().map(ScannerName::new).collect();
        self
    }

    pub fn outcome(mut self, outcome: FakeOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Shares a counter with the caller so tests can assert how many times
    /// (and in what order, via interior timestamps) this scanner actually ran.
    pub fn run_count(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.run_count)
    }
}

#[async_trait]
impl ScannerDescriptor for FakeScanner {
    fn name(&self) -> ScannerName {
        self.name.clone()
    }

    fn description(&self) -> &str {
        "scripted scanner for tests"
    }

    fn dependencies(&self) -> BTreeSet<ScannerName> {
        self.dependencies.clone()
    }

    async fn run(&self, ctx: &ScanContext, _opts: &ScanOptions) -> ScanResult {
        self.run_count.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            FakeOutcome::Complete => {
                if self.delay > Duration::ZERO {
                    tokio::time::sleep(self.delay).await;
                }
                ctx.finish(self.name.as_str(), json!({}), Vec::new(), self.delay)
            }
            FakeOutcome::Failed => ScanResult::failed(self.delay, "scripted failure"),
            FakeOutcome::Hang => {
                tokio::time::sleep(self.delay + Duration::from_secs(3600)).await;
                ctx.finish(self.name.as_str(), json!({}), Vec::new(), self.delay)
            }
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
