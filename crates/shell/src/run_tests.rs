// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::ShellCommand;

#[tokio::test]
async fn captures_stdout_on_success() {
    let cmd = ShellCommand::new("echo").arg("hello");
    let output = run(&cmd, None, CancellationToken::new()).await.unwrap();
    assert_eq!(output.outcome, Outcome::Exited(0));
    assert_eq!(output.stdout_snippet.as_deref(), Some("hello\n"));
}

#[tokio::test]
async fn nonzero_exit_is_not_success() {
    let cmd = ShellCommand::new("false");
    let output = run(&cmd, None, CancellationToken::new()).await.unwrap();
    assert!(!output.outcome.is_success());
}

#[tokio::test]
async fn deadline_elapsing_kills_the_process_and_reports_timed_out() {
    let cmd = ShellCommand::new("sleep").arg("5");
    let output = run(&cmd, Some(Duration::from_millis(50)), CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(output.outcome, Outcome::TimedOut);
}

#[tokio::test]
async fn cancel_token_kills_the_process_and_reports_cancelled() {
    let cmd = ShellCommand::new("sleep").arg("5");
    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel_clone.cancel();
    });
    let output = run(&cmd, None, cancel).await.unwrap();
    assert_eq!(output.outcome, Outcome::Cancelled);
}

#[tokio::test]
async fn unknown_program_is_a_spawn_error() {
    let cmd = ShellCommand::new("definitely-not-a-real-binary-zero");
    let err = run(&cmd, None, CancellationToken::new()).await.unwrap_err();
    assert!(matches!(err, ShellError::SpawnFailed { .. }));
}
