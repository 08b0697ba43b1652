//! `zero refresh` — re-scan targets that are Stale or worse, or every known
//! target with `--force`.

use crate::prelude::*;

#[test]
fn refresh_with_no_known_targets_does_nothing() {
    let home = Home::empty();
    home.zero().args(&["refresh"]).passes().stdout_has("nothing to refresh");
}

#[test]
fn refresh_skips_a_fresh_target_unless_forced() {
    let home = Home::empty();
    home.seed_target("acme", "widgets");
    home.zero().args(&["scan", "acme/widgets"]).exits_with(1);

    // Freshly scanned, so a plain refresh (no target, no --force) has
    // nothing Stale to re-scan.
    home.zero().args(&["refresh"]).passes().stdout_has("nothing to refresh");

    // --force re-scans regardless of freshness.
    home.zero().args(&["refresh", "--force"]).exits_with(1).stdout_has("refreshed");
}
