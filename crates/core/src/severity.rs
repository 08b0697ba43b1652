// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Finding severity and the worst-severity rollup used by the index.

use serde::{Deserialize, Serialize};

/// Severity of a [`crate::finding::Finding`].
///
/// Ordered worst-first is the natural reading ("Critical is worse than
/// Low"), but `Ord` is derived in declaration order, which Rust evaluates
/// top-to-bottom as *less than* — so `Critical` is declared first and compares
/// greatest via the derived order reversing under `max()`. To avoid relying on
/// that subtlety everywhere, [`Severity::rank`] gives an explicit numeric
/// ordering (higher = worse) and [`Severity::worst`] is the rollup helper
/// consumers should call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Higher rank is worse.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Info => 0,
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }

    /// The worse of two severities.
    pub fn worst(self, other: Severity) -> Severity {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

crate::simple_display! {
    Severity {
        Info => "Info",
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Critical => "Critical",
    }
}

/// Worst-severity rollup for a target, including the "nothing found" case
/// (distinct from any [`Severity`] variant — spec.md's index shape allows
/// `"worst_severity": "None"`).
///
/// Serializes as a bare string (`"Critical"`, `"None"`, …) to match the
/// engine-owned index JSON shape in spec.md §6 exactly, rather than as a
/// tagged enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityRollup {
    None,
    Severity(Severity),
}

impl SeverityRollup {
    pub fn fold(findings: impl IntoIterator<Item = Severity>) -> Self {
        findings
            .into_iter()
            .fold(None, |acc, s| Some(acc.map_or(s, |a: Severity| a.worst(s))))
            .map_or(SeverityRollup::None, SeverityRollup::Severity)
    }
}

impl std::fmt::Display for SeverityRollup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeverityRollup::None => f.write_str("None"),
            SeverityRollup::Severity(s) => write!(f, "{s}"),
        }
    }
}

impl std::str::FromStr for SeverityRollup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "None" => SeverityRollup::None,
            "Info" => SeverityRollup::Severity(Severity::Info),
            "Low" => SeverityRollup::Severity(Severity::Low),
            "Medium" => SeverityRollup::Severity(Severity::Medium),
            "High" => SeverityRollup::Severity(Severity::High),
            "Critical" => SeverityRollup::Severity(Severity::Critical),
            other => return Err(format!("unknown severity rollup {other:?}")),
        })
    }
}

impl Serialize for SeverityRollup {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SeverityRollup {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "severity_tests.rs"]
mod tests;
