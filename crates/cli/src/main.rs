// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `zero`: the command-line front end for the Scanner Orchestration Engine.
//!
//! Each subcommand maps to one Driver operation (spec.md §6). Commands
//! return an [`exit_error::ExitError`] instead of calling `std::process::exit`
//! directly, so `main` is the single place that translates a result into a
//! process exit code.

mod color;
mod commands;
mod exit_error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use zero_core::Target;

use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "zero", version = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH")))]
#[command(about = "Repository security and health scanner orchestration")]
#[command(styles = color::styles())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Clone a target if needed, then run a scan (spec.md §6 `Hydrate`).
    Hydrate {
        /// `owner/repo`
        target: Target,
        /// Execution profile: quick, security, or full.
        #[arg(default_value = "quick")]
        profile: String,
        /// Clone URL override; defaults to `https://github.com/<target>`.
        #[arg(long)]
        origin: Option<String>,
    },
    /// Scan a target whose working tree already exists (spec.md §6 `Scan`).
    Scan {
        target: Target,
        #[arg(default_value = "quick")]
        profile: String,
        /// Also run these scanners beyond the profile's defaults (repeatable).
        #[arg(long = "scanner")]
        scanners: Vec<String>,
    },
    /// Show the known targets' freshness and severity rollup (spec.md §6 `Status`).
    Status {
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Shorthand for `--format json`.
        #[arg(long, conflicts_with = "format")]
        json: bool,
    },
    /// Re-scan targets that are Stale or worse, or every target with `--force` (spec.md §6 `Refresh`).
    Refresh {
        target: Option<Target>,
        #[arg(long)]
        force: bool,
        #[arg(long, default_value = "quick")]
        profile: String,
    },
    /// Remove a target's working tree, artifacts, and index entry (spec.md §6 `Clean`).
    Clean { target: Target },
    /// Debounced, coalesced re-scans on filesystem changes (spec.md §6 `Watch`).
    Watch {
        target: Target,
        #[arg(default_value = "quick")]
        profile: String,
        #[arg(long)]
        debounce: Option<u64>,
        #[arg(long = "scanner")]
        scanners: Vec<String>,
    },
    /// Enumerate the registered scanners (spec.md §4.1 `List`).
    List,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let _log_guard = match setup_logging() {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("error: failed to initialize logging: {err}");
            return std::process::ExitCode::from(exit_error::CONFIG_ERROR as u8);
        }
    };

    match dispatch(cli.command).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::ExitCode::from(err.code as u8)
        }
    }
}

async fn dispatch(command: Command) -> Result<(), ExitError> {
    match command {
        Command::Hydrate { target, profile, origin } => commands::hydrate::run(target, profile, origin).await,
        Command::Scan { target, profile, scanners } => commands::scan::run(target, profile, scanners).await,
        Command::Status { format, json } => {
            let format = if json { OutputFormat::Json } else { format };
            commands::status::run(format)
        }
        Command::Refresh { target, force, profile } => commands::refresh::run(target, force, profile).await,
        Command::Clean { target } => commands::clean::run(target),
        Command::Watch { target, profile, debounce, scanners } => commands::watch::run(target, profile, debounce, scanners).await,
        Command::List => commands::list::run(),
    }
}

fn setup_logging() -> Result<tracing_appender::non_blocking::WorkerGuard, std::io::Error> {
    let home = zero_daemon::resolve_home();
    std::fs::create_dir_all(&home)?;

    let file_appender = tracing_appender::rolling::never(&home, "zero.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(filter).with(fmt::layer().with_writer(non_blocking).with_ansi(false)).init();

    Ok(guard)
}
