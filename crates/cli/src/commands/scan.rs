// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `zero scan <target> [profile]` (spec.md §6): assumes the working tree is
//! already present (use `hydrate` otherwise).

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use zero_core::Target;
use zero_profiles::Overrides;

use crate::commands::{build_driver, spawn_progress_printer};
use crate::exit_error::{ExitError, CANCELLED, SCANNER_FAILED};
use crate::output::print_run_report;

pub async fn run(target: Target, profile: String, scanners: Vec<String>) -> Result<(), ExitError> {
    let driver = build_driver()?;
    let overrides = scanners.into_iter().fold(Overrides::new(), |acc, name| acc.enable_scanner(name));

    let (progress_tx, progress_rx) = broadcast::channel(256);
    let printer = spawn_progress_printer(progress_rx);
    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_cancel.cancel();
        }
    });

    println!("{} {target}", crate::color::header("scanning"));
    let result = driver.scan_with_progress(&target, &profile, overrides, progress_tx, cancel.clone()).await;
    let _ = printer.await;

    let report = result.map_err(|err| ExitError::config(err.to_string()))?;
    print_run_report(&report);

    if report.cancelled {
        return Err(ExitError::new(CANCELLED, "scan cancelled"));
    }
    if report.any_failed() {
        return Err(ExitError::new(SCANNER_FAILED, "one or more scanners failed"));
    }
    Ok(())
}
