// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Resolve(profileName, overrides) → ExecutionRequest` (spec.md §4.2).

use std::collections::BTreeSet;

use zero_core::ScannerName;

use crate::catalog;
use crate::error::ProfileError;
use crate::overrides::Overrides;
use crate::request::ExecutionRequest;

/// Resolve a profile name plus overrides into an [`ExecutionRequest`].
///
/// `known_scanners` is the set of names the Scanner Registry has actually
/// registered; this crate carries no registry of its own (spec.md §0
/// dependency direction: `scanners` ← `profiles`, not the other way), so
/// callers at the engine layer supply it for fail-fast validation.
pub fn resolve(
    profile_name: &str,
    overrides: &Overrides,
    known_scanners: &BTreeSet<ScannerName>,
) -> Result<ExecutionRequest, ProfileError> {
    let profile = catalog::find(profile_name).ok_or_else(|| ProfileError::UnknownProfile(profile_name.to_string()))?;

    for scanner in overrides.referenced_scanners() {
        if !known_scanners.contains(scanner) {
            return Err(ProfileError::UnknownScanner(scanner.to_string()));
        }
    }

    let mut request = ExecutionRequest::new();
    for scanner in profile.scanner_names() {
        if !overrides.disable_scanners.contains(&scanner) {
            request.ensure_scanner(scanner);
        }
    }

    for scanner in &overrides.enable_scanners {
        if !overrides.disable_scanners.contains(scanner) {
            request.ensure_scanner(scanner.clone());
        }
    }

    for (scanner, feature) in &overrides.enable_features {
        if overrides.disable_scanners.contains(scanner) {
            continue;
        }
        // A feature enable implicitly materializes its scanner even if the
        // profile and `enable_scanners` both omitted it.
        request.enable_feature(scanner.clone(), feature.clone());
    }

    Ok(request)
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
