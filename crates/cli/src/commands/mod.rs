// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations — one module per driver operation (spec.md
//! §6), plus `list` for the Scanner Registry.

pub mod clean;
pub mod hydrate;
pub mod list;
pub mod refresh;
pub mod scan;
pub mod status;
pub mod watch;

use std::sync::Arc;

use tokio::sync::broadcast;
use zero_core::ExitReason;
use zero_daemon::{Driver, GitCloner};
use zero_wire::ProgressEvent;

use crate::exit_error::ExitError;

/// Build the [`Driver`] against the process home (spec.md §6: `$ZERO_HOME`,
/// defaulting to `.zero`), wired to the real [`GitCloner`].
pub fn build_driver() -> Result<Driver, ExitError> {
    let home = zero_daemon::resolve_home();
    Driver::new(home, Arc::new(GitCloner::new()))
        .map_err(|err| ExitError::config(format!("configuration error: {err}")))
}

/// Print one progress event as a single line, for `hydrate`/`scan`/
/// `refresh`/`watch`. Spans the `ScannerStarted` → terminal-event lifetime
/// of each scanner (spec.md §4.4 "Progress ordering guarantee").
pub fn print_progress_line(event: &ProgressEvent) {
    match event {
        ProgressEvent::ScannerStarted { scanner } => {
            println!("{} {scanner}", crate::color::context("→"));
        }
        ProgressEvent::ScannerProgress { scanner, message } => {
            println!("{} {scanner}: {message}", crate::color::muted("·"));
        }
        ProgressEvent::ScannerCompleted { scanner, duration_ms } => {
            let elapsed = zero_core::format_elapsed_ms(*duration_ms);
            println!("{} {scanner} ({elapsed})", crate::color::literal("✓"));
        }
        ProgressEvent::ScannerFailed { scanner, exit_reason } => {
            println!("{} {scanner}: {}", crate::color::severity("✗", Some(4)), describe_exit_reason(exit_reason));
        }
        ProgressEvent::ScannerCancelled { scanner, exit_reason } => {
            println!("{} {scanner}: {}", crate::color::muted("⊘"), describe_exit_reason(exit_reason));
        }
    }
}

fn describe_exit_reason(reason: &ExitReason) -> String {
    reason.to_string()
}

/// Spawn a background task that prints every event off `rx` until the
/// sender side is dropped. The scheduler never blocks on this observer
/// (spec.md §4.4): the channel itself is bounded and drops oldest on
/// overflow.
pub fn spawn_progress_printer(mut rx: broadcast::Receiver<ProgressEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => print_progress_line(&event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "progress observer lagged; events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
