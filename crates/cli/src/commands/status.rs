// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `zero status` (spec.md §6): every known target's rollup, consulting the
//! Index and Freshness Tracker.

use crate::commands::build_driver;
use crate::exit_error::ExitError;
use crate::output::{print_status, OutputFormat};

pub fn run(format: OutputFormat) -> Result<(), ExitError> {
    let driver = build_driver()?;
    let summaries = driver.status().map_err(|err| ExitError::config(err.to_string()))?;
    print_status(&summaries, format)?;
    Ok(())
}
