//! `zero clean` — remove a target's subtree and index entry.

use crate::prelude::*;

#[test]
fn clean_removes_the_target_directory() {
    let home = Home::empty();
    let working_tree = home.seed_target("acme", "widgets");
    assert!(working_tree.exists());

    home.zero().args(&["clean", "acme/widgets"]).passes().stdout_has("cleaned acme/widgets");

    assert!(!home.path().join("repos/acme/widgets").exists());
}

#[test]
fn clean_removes_the_target_from_status() {
    let home = Home::empty();
    home.seed_target("acme", "widgets");
    home.zero().args(&["scan", "acme/widgets"]).exits_with(1);
    home.zero().args(&["clean", "acme/widgets"]).passes();

    home.zero().args(&["status"]).passes().stdout_has("no targets scanned yet");
}
