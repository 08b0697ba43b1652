//! `zero scan` — scan a target whose working tree already exists.

use crate::prelude::*;

#[test]
fn scan_without_a_working_tree_is_a_configuration_error() {
    let home = Home::empty();
    home.zero().args(&["scan", "acme/widgets"]).exits_with(2).stderr_has("acme/widgets");
}

#[test]
fn scan_reports_missing_scanner_binaries_as_failed_not_a_crash() {
    let home = Home::empty();
    home.seed_target("acme", "widgets");

    home.zero().args(&["scan", "acme/widgets"]).exits_with(1).stdout_has("sbom").stdout_has("gitleaks");
}

#[test]
fn scan_accepts_a_scanner_subset() {
    let home = Home::empty();
    home.seed_target("acme", "widgets");

    home.zero()
        .args(&["scan", "acme/widgets", "quick", "--scanner", "gitleaks"])
        .exits_with(1)
        .stdout_has("gitleaks");
}
