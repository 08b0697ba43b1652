//! `zero status` — every known target's rollup.

use crate::prelude::*;

#[test]
fn status_on_an_empty_home_says_nothing_scanned() {
    let home = Home::empty();
    home.zero().args(&["status"]).passes().stdout_has("no targets scanned yet");
}

#[test]
fn status_json_lists_a_scanned_target() {
    let home = Home::empty();
    home.seed_target("acme", "widgets");
    home.zero().args(&["scan", "acme/widgets"]).exits_with(1);

    home.zero()
        .args(&["status", "--json"])
        .passes()
        .stdout_has("\"owner\": \"acme\"")
        .stdout_has("\"repo\": \"widgets\"");
}

#[test]
fn status_text_shows_the_freshness_rollup() {
    let home = Home::empty();
    home.seed_target("acme", "widgets");
    home.zero().args(&["scan", "acme/widgets"]).exits_with(1);

    home.zero().args(&["status"]).passes().stdout_has("acme/widgets").stdout_has("Fresh");
}
