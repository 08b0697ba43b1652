// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line overrides to a resolved profile (spec.md §4.2).

use std::collections::BTreeSet;

use zero_core::{FeatureName, ScannerName};

/// Adjustments a driver may apply on top of a named profile.
///
/// `enable_features` may name a scanner not present in the profile — the
/// resolver materializes it implicitly (spec.md §4.2 edge case).
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub enable_scanners: BTreeSet<ScannerName>,
    pub disable_scanners: BTreeSet<ScannerName>,
    pub enable_features: Vec<(ScannerName, FeatureName)>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable_scanner(mut self, scanner: impl Into<ScannerName>) -> Self {
        self.enable_scanners.insert(scanner.into());
        self
    }

    pub fn disable_scanner(mut self, scanner: impl Into<ScannerName>) -> Self {
        self.disable_scanners.insert(scanner.into());
        self
    }

    pub fn enable_feature(mut self, scanner: impl Into<ScannerName>, feature: impl Into<FeatureName>) -> Self {
        self.enable_features.push((scanner.into(), feature.into()));
        self
    }

    /// Every scanner this override touches, for fail-fast validation against
    /// the registered scanner universe.
    pub fn referenced_scanners(&self) -> impl Iterator<Item = &ScannerName> {
        self.enable_scanners
            .iter()
            .chain(self.disable_scanners.iter())
            .chain(self.enable_features.iter().map(|(s, _)| s))
    }
}

#[cfg(test)]
#[path = "overrides_tests.rs"]
mod tests;
