// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `zero list` (spec.md §6): enumerate registered scanners.

use zero_scanners::ScannerDescriptor;

use crate::commands::build_driver;
use crate::exit_error::ExitError;

pub fn run() -> Result<(), ExitError> {
    let driver = build_driver()?;
    let registry = driver.registry();

    for (name, scanner) in registry.entries() {
        let deps: Vec<&str> = scanner.dependencies().iter().map(|d| d.as_str()).collect();
        let deps_suffix = if deps.is_empty() { String::new() } else { format!(" (needs {})", deps.join(", ")) };
        println!("{:<12} {}{}", crate::color::literal(name.as_str()), scanner.description(), crate::color::muted(&deps_suffix));
    }
    Ok(())
}
