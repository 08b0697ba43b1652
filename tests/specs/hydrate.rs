//! `zero hydrate` — clone-if-needed then scan.

use crate::prelude::*;

#[test]
fn hydrate_skips_cloning_when_working_tree_already_exists() {
    let home = Home::empty();
    home.seed_target("acme", "widgets");

    // The quick profile's built-in scanners (sbom/gitleaks) shell out to
    // tools this sandbox does not have installed, so the run reports
    // Failed rather than Complete — but that is a graceful, non-crashing
    // outcome (spec.md §7 "failure isolation"), and `hydrate` must still
    // have skipped the clone and written `project.json`.
    home.zero().args(&["hydrate", "acme/widgets"]).exits_with(1).stdout_has("hydrating");

    assert!(home.path().join("repos/acme/widgets/project.json").exists());
    assert!(home.path().join("repos/acme/widgets/analysis/manifest.json").exists());
}

#[test]
fn hydrate_rejects_a_malformed_target() {
    let home = Home::empty();
    home.zero().args(&["hydrate", "not-a-target"]).fails();
}
