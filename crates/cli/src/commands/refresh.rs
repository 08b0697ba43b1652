// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `zero refresh [target] [--force] [--profile]` (spec.md §6): re-scan
//! targets whose rollup is Stale or worse, or every known target with
//! `--force`.

use zero_core::Target;

use crate::commands::build_driver;
use crate::exit_error::{ExitError, SCANNER_FAILED};
use crate::output::print_run_report;

pub async fn run(target: Option<Target>, force: bool, profile: String) -> Result<(), ExitError> {
    let driver = build_driver()?;
    let reports = driver.refresh(target.as_ref(), force, &profile).await.map_err(|err| ExitError::config(err.to_string()))?;

    if reports.is_empty() {
        println!("nothing to refresh");
        return Ok(());
    }

    let mut any_failed = false;
    for report in &reports {
        println!("{} {}", crate::color::header("refreshed"), report.manifest.target);
        print_run_report(report);
        any_failed |= report.any_failed();
    }

    if any_failed {
        return Err(ExitError::new(SCANNER_FAILED, "one or more scanners failed"));
    }
    Ok(())
}
