// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `zero hydrate <target> [profile]` (spec.md §6): clone the target if it
//! has no working tree yet, then run a scan.

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use zero_core::Target;
use zero_profiles::Overrides;

use crate::commands::{build_driver, spawn_progress_printer};
use crate::exit_error::{ExitError, CANCELLED, SCANNER_FAILED};
use crate::output::print_run_report;

pub async fn run(target: Target, profile: String, origin: Option<String>) -> Result<(), ExitError> {
    let driver = build_driver()?;
    let origin = origin.unwrap_or_else(|| format!("https://github.com/{}/{}", target.owner, target.repo));

    let (progress_tx, progress_rx) = broadcast::channel(256);
    let printer = spawn_progress_printer(progress_rx);
    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_cancel.cancel();
        }
    });

    println!("{} {target}", crate::color::header("hydrating"));
    let result = driver
        .hydrate_with_progress(&target, &profile, &origin, Overrides::new(), progress_tx, cancel.clone())
        .await;
    let _ = printer.await;

    let report = result.map_err(|err| ExitError::config(err.to_string()))?;
    print_run_report(&report);

    if report.cancelled {
        return Err(ExitError::new(CANCELLED, "hydrate cancelled"));
    }
    if report.any_failed() {
        return Err(ExitError::new(SCANNER_FAILED, "one or more scanners failed"));
    }
    Ok(())
}
