// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawns one [`ShellCommand`], racing its completion against a deadline and
//! a cooperative cancel signal (spec.md §4.4, §4.6).

use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{info_span, warn};

use crate::command::ShellCommand;
use crate::error::ShellError;
use crate::output::{truncate_snippet, CommandOutput, Outcome, DEFAULT_SNIPPET_LIMIT};

/// Run `cmd`, killing it and reporting `TimedOut` if `deadline` elapses
/// first, or `Cancelled` if `cancel` fires first.
///
/// A `None` deadline means no per-scanner timeout is enforced beyond the
/// cancel signal — callers should always pass one in production; tests may
/// omit it.
pub async fn run(
    cmd: &ShellCommand,
    deadline: Option<Duration>,
    cancel: CancellationToken,
) -> Result<CommandOutput, ShellError> {
    let start = Instant::now();
    let span = info_span!("shell.run", program = %cmd.program, args = ?cmd.args);
    let _entered = span.enter();

    let mut process = Command::new(&cmd.program);
    process.args(&cmd.args);
    if let Some(cwd) = &cmd.cwd {
        process.current_dir(cwd);
    }
    process.envs(cmd.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    process.stdout(Stdio::piped());
    process.stderr(Stdio::piped());

    let mut child = process.spawn().map_err(|source| ShellError::SpawnFailed {
        command: cmd.program.clone(),
        source,
    })?;

    let mut stdout = child.stdout.take();
    let mut stderr = child.stderr.take();
    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(s) = stdout.as_mut() {
            let _ = s.read_to_end(&mut buf).await;
        }
        buf
    });
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(s) = stderr.as_mut() {
            let _ = s.read_to_end(&mut buf).await;
        }
        buf
    });

    let sleep = async {
        match deadline {
            Some(d) => tokio::time::sleep(d).await,
            None => std::future::pending().await,
        }
    };

    let outcome = tokio::select! {
        status = child.wait() => {
            let status = status.map_err(|source| ShellError::WaitFailed {
                command: cmd.program.clone(),
                source,
            })?;
            Outcome::Exited(status.code().unwrap_or(-1))
        }
        _ = cancel.cancelled() => {
            warn!(program = %cmd.program, "cancelling in-flight process");
            kill(&mut child, &cmd.program).await?;
            Outcome::Cancelled
        }
        _ = sleep => {
            warn!(program = %cmd.program, ?deadline, "process exceeded its deadline");
            kill(&mut child, &cmd.program).await?;
            Outcome::TimedOut
        }
    };

    let stdout_bytes = stdout_task.await.unwrap_or_default();
    let stderr_bytes = stderr_task.await.unwrap_or_default();

    Ok(CommandOutput {
        command: cmd.program.clone(),
        args: cmd.args.clone(),
        outcome,
        duration: start.elapsed(),
        stdout_snippet: truncate_snippet(&stdout_bytes, DEFAULT_SNIPPET_LIMIT),
        stderr_snippet: truncate_snippet(&stderr_bytes, DEFAULT_SNIPPET_LIMIT),
    })
}

async fn kill(child: &mut tokio::process::Child, program: &str) -> Result<(), ShellError> {
    child.start_kill().map_err(|source| ShellError::KillFailed {
        command: program.to_string(),
        source,
    })?;
    let _ = child.wait().await;
    Ok(())
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
