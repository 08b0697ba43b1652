// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Watcher (spec.md §4.7): reacts to filesystem changes in a target's
//! working tree and triggers scoped re-scans, debounced and coalesced.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher as _};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::DriverError;

/// `Watch(target, options)` configuration (spec.md §4.7).
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Wall-clock quiet period after the last observed change before a run
    /// is triggered. Changes arriving during the window reset the timer.
    pub debounce: Duration,
    /// Globs matched against changed paths; a match suppresses the event
    /// entirely (it neither triggers nor resets the debounce timer).
    pub ignore_globs: Vec<String>,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self { debounce: Duration::from_secs(2), ignore_globs: default_ignore_globs() }
    }
}

fn default_ignore_globs() -> Vec<String> {
    vec![
        "**/.git/**".to_string(),
        "**/*.swp".to_string(),
        "**/*.swx".to_string(),
        "**/*~".to_string(),
        "**/.zero/**".to_string(),
    ]
}

struct IgnoreSet {
    patterns: Vec<glob::Pattern>,
}

impl IgnoreSet {
    fn compile(globs: &[String]) -> Self {
        let patterns = globs.iter().filter_map(|g| glob::Pattern::new(g).ok()).collect();
        Self { patterns }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        self.patterns.iter().any(|p| p.matches_path(path))
    }
}

/// A running watch over one working tree. Dropping this stops the
/// underlying filesystem watch; the debounce task exits once `cancel` is
/// cancelled or the last sender side of its internal channel is dropped.
pub struct Watcher {
    _fs_watcher: RecommendedWatcher,
    pub triggers: mpsc::Receiver<()>,
}

/// Begin watching `path` for changes, emitting a debounced, coalesced
/// trigger on [`Watcher::triggers`] for each quiet period observed.
///
/// Coalescing (spec.md §4.7 "only one scan runs per target at a time;
/// concurrent triggers collapse into at most one pending run") follows from
/// the bounded, capacity-1 trigger channel: a trigger that arrives while
/// the previous one is still unconsumed is silently dropped rather than
/// queued.
pub fn watch(path: &Path, options: WatchOptions, cancel: CancellationToken) -> Result<Watcher, DriverError> {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let mut fs_watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res {
            for changed in event.paths {
                let _ = events_tx.send(changed);
            }
        }
    })
    .map_err(|source| DriverError::Watch { path: path.to_path_buf(), source })?;

    fs_watcher
        .watch(path, RecursiveMode::Recursive)
        .map_err(|source| DriverError::Watch { path: path.to_path_buf(), source })?;

    let (trigger_tx, trigger_rx) = mpsc::channel(1);
    tokio::spawn(debounce_loop(events_rx, trigger_tx, options, cancel));

    Ok(Watcher { _fs_watcher: fs_watcher, triggers: trigger_rx })
}

async fn debounce_loop(
    mut events_rx: mpsc::UnboundedReceiver<PathBuf>,
    trigger_tx: mpsc::Sender<()>,
    options: WatchOptions,
    cancel: CancellationToken,
) {
    let ignore = IgnoreSet::compile(&options.ignore_globs);

    loop {
        let first = tokio::select! {
            _ = cancel.cancelled() => return,
            event = events_rx.recv() => event,
        };
        let Some(path) = first else { return };
        if ignore.is_ignored(&path) {
            continue;
        }

        let mut deadline = Instant::now() + options.debounce;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep_until(deadline) => break,
                event = events_rx.recv() => {
                    match event {
                        Some(path) if !ignore.is_ignored(&path) => {
                            deadline = Instant::now() + options.debounce;
                        }
                        Some(_) => {}
                        None => return,
                    }
                }
            }
        }

        // Coalesced by the bounded channel: if a trigger is already
        // pending, this one is dropped rather than queued.
        let _ = trigger_tx.try_send(());
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
