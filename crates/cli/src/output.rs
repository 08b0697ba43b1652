// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text rendering shared by the `hydrate`/`scan`/`refresh` run reports and
//! the `status` command's `--json` mode (spec.md §6, §7 "User-visible
//! behavior": failed or skipped scanners are visible in the per-target
//! detail view").

use clap::ValueEnum;
use zero_core::{ScanStatus, SeverityRollup};
use zero_daemon::TargetSummary;
use zero_engine::RunReport;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn severity_rank(rollup: SeverityRollup) -> Option<u8> {
    match rollup {
        SeverityRollup::None => None,
        SeverityRollup::Severity(s) => Some(s.rank()),
    }
}

fn colorize_status(status: ScanStatus) -> String {
    match status {
        ScanStatus::Complete => crate::color::severity("Complete", None),
        ScanStatus::Pending => crate::color::muted("Pending"),
        ScanStatus::Skipped => crate::color::muted("Skipped"),
        ScanStatus::Failed => crate::color::severity("Failed", Some(4)),
        ScanStatus::Cancelled => crate::color::severity("Cancelled", Some(2)),
    }
}

/// Render one run's manifest: per-scanner status, duration, and exit reason
/// when non-`Complete` (spec.md §6 manifest shape; §7 "failed or skipped
/// scanners are visible").
pub fn print_run_report(report: &RunReport) {
    println!();
    for (name, entry) in &report.manifest.scanners {
        let duration = entry.duration_ms.map(zero_core::format_elapsed_ms).unwrap_or_else(|| "-".to_string());
        let mut line = format!("  {:<14} {:<10} {:>8}", name, colorize_status(entry.status), duration);
        if let Some(reason) = &entry.exit_reason {
            line.push_str(&format!("  {}", crate::color::muted(&reason.to_string())));
        }
        println!("{line}");
    }
    println!();
    if report.cancelled {
        println!("{}", crate::color::severity("run cancelled", Some(3)));
    }
}

/// `status` command, text mode: one line per target plus a per-scanner
/// detail block (spec.md §7).
pub fn print_status_text(summaries: &[TargetSummary]) {
    if summaries.is_empty() {
        println!("no targets scanned yet");
        return;
    }
    for summary in summaries {
        let rollup_text = summary.worst_severity.to_string();
        println!(
            "{:<32} {:<10} {}",
            summary.target.to_string(),
            summary.freshness.to_string(),
            crate::color::severity(&rollup_text, severity_rank(summary.worst_severity))
        );
        for (scanner, entry) in &summary.scanners {
            if entry.status != ScanStatus::Complete {
                println!("  {:<14} {}", scanner, colorize_status(entry.status));
            }
        }
    }
}

/// `status --json`: the same data, machine-readable.
pub fn print_status_json(summaries: &[TargetSummary]) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(summaries)?);
    Ok(())
}

pub fn print_status(summaries: &[TargetSummary], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print_status_text(summaries),
        OutputFormat::Json => print_status_json(summaries)?,
    }
    Ok(())
}
