// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn fake_cloner_materializes_an_empty_working_tree() {
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("repo");
    let cloner = FakeCloner::new();
    let target = Target::new("acme", "widgets");

    cloner.clone(&target, &destination).await.unwrap();

    assert!(destination.is_dir());
}

#[tokio::test]
async fn fake_cloner_seeds_requested_files() {
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("repo");
    let cloner = FakeCloner { seed_files: vec![PathBuf::from("README.md")] };
    let target = Target::new("acme", "widgets");

    cloner.clone(&target, &destination).await.unwrap();

    assert!(destination.join("README.md").exists());
}
