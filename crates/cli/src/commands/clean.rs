// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `zero clean <target>` (spec.md §6): removes a target's subtree and
//! index entry.

use zero_core::Target;

use crate::commands::build_driver;
use crate::exit_error::ExitError;

pub fn run(target: Target) -> Result<(), ExitError> {
    let driver = build_driver()?;
    driver.clean(&target).map_err(|err| ExitError::config(err.to_string()))?;
    println!("cleaned {target}");
    Ok(())
}
