// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use super::*;

async fn next_trigger(triggers: &mut mpsc::Receiver<()>, within: Duration) -> bool {
    tokio::time::timeout(within, triggers.recv()).await.is_ok()
}

#[tokio::test]
async fn a_file_write_triggers_after_the_debounce_window() {
    let dir = tempfile::tempdir().unwrap();
    let cancel = CancellationToken::new();
    let options = WatchOptions { debounce: Duration::from_millis(50), ..Default::default() };
    let mut watcher = watch(dir.path(), options, cancel.clone()).unwrap();

    std::fs::write(dir.path().join("a.txt"), b"hello").unwrap();

    assert!(next_trigger(&mut watcher.triggers, Duration::from_secs(5)).await);
    cancel.cancel();
}

#[tokio::test]
async fn rapid_writes_collapse_into_a_single_trigger() {
    let dir = tempfile::tempdir().unwrap();
    let cancel = CancellationToken::new();
    let options = WatchOptions { debounce: Duration::from_millis(100), ..Default::default() };
    let mut watcher = watch(dir.path(), options, cancel.clone()).unwrap();

    for i in 0..5 {
        std::fs::write(dir.path().join(format!("f{i}.txt")), b"x").unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert!(next_trigger(&mut watcher.triggers, Duration::from_secs(5)).await);
    // A second trigger must not already be queued from the burst above.
    assert!(!next_trigger(&mut watcher.triggers, Duration::from_millis(150)).await);
    cancel.cancel();
}

#[tokio::test]
async fn ignored_paths_do_not_trigger_a_scan() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join(".git")).unwrap();
    let cancel = CancellationToken::new();
    let options = WatchOptions { debounce: Duration::from_millis(50), ..Default::default() };
    let mut watcher = watch(dir.path(), options, cancel.clone()).unwrap();

    std::fs::write(dir.path().join(".git").join("HEAD"), b"ref: refs/heads/main").unwrap();

    assert!(!next_trigger(&mut watcher.triggers, Duration::from_millis(500)).await);
    cancel.cancel();
}

#[test]
fn ignore_set_matches_default_vcs_and_swap_globs() {
    let ignore = IgnoreSet::compile(&default_ignore_globs());

    assert!(ignore.is_ignored(Path::new("repo/.git/HEAD")));
    assert!(ignore.is_ignored(Path::new("repo/src/main.rs.swp")));
    assert!(ignore.is_ignored(Path::new("repo/src/main.rs~")));
    assert!(!ignore.is_ignored(Path::new("repo/src/main.rs")));
}
