// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The fixed set of named profiles (spec.md §4.2: "recognized profiles and
//! their scanner sets are fixed configuration").

use zero_core::ScannerName;

/// One named bundle of scanners, each with its default feature set.
pub struct Profile {
    pub name: &'static str,
    pub scanners: &'static [&'static str],
}

/// `quick` — the two scanners cheap enough to run on every push: secrets
/// and an SBOM, neither of which shells out to a network service.
pub const QUICK: Profile = Profile { name: "quick", scanners: &["sbom", "gitleaks"] };

/// `security` — the default profile for a scheduled or on-demand scan.
pub const SECURITY: Profile =
    Profile { name: "security", scanners: &["sbom", "gitleaks", "osv", "semgrep"] };

/// `full` — every built-in scanner.
pub const FULL: Profile =
    Profile { name: "full", scanners: &["sbom", "gitleaks", "osv", "trivy", "semgrep", "checkov"] };

const PROFILES: &[&Profile] = &[&QUICK, &SECURITY, &FULL];

/// Look up a profile by name.
pub fn find(name: &str) -> Option<&'static Profile> {
    PROFILES.iter().find(|p| p.name == name).copied()
}

impl Profile {
    pub fn scanner_names(&self) -> impl Iterator<Item = ScannerName> + '_ {
        self.scanners.iter().map(ScannerName::new)
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
