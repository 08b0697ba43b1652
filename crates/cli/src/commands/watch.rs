// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `zero watch <target> [--debounce <seconds>] [--scanners <list>]`
//! (spec.md §6, §4.7): debounced, coalesced re-scans triggered by
//! filesystem changes, running until interrupted.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use zero_core::Target;
use zero_daemon::WatchOptions;
use zero_profiles::Overrides;

use crate::commands::{build_driver, spawn_progress_printer};
use crate::exit_error::ExitError;

pub async fn run(target: Target, profile: String, debounce_secs: Option<u64>, scanners: Vec<String>) -> Result<(), ExitError> {
    let driver = build_driver()?;
    let overrides = scanners.into_iter().fold(Overrides::new(), |acc, name| acc.enable_scanner(name));

    let mut options = WatchOptions::default();
    if let Some(secs) = debounce_secs {
        options.debounce = Duration::from_secs(secs);
    }

    let (progress_tx, progress_rx) = broadcast::channel(256);
    let printer = spawn_progress_printer(progress_rx);
    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_cancel.cancel();
        }
    });

    println!(
        "{} {target} (debounce {:?}, ctrl-c to stop)",
        crate::color::header("watching"),
        options.debounce
    );
    let result = driver.watch(&target, &profile, overrides, options, progress_tx, cancel).await;
    let _ = printer.await;

    result.map_err(|err| ExitError::config(err.to_string()))
}
