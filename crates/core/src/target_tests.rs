// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn display_matches_slug() {
    let t = Target::new("crashappsec", "zero");
    assert_eq!(t.to_string(), "crashappsec/zero");
    assert_eq!(t.slug(), "crashappsec/zero");
}

#[parameterized(
    simple = { "crashappsec/zero" },
    hyphenated = { "my-org/my-repo" },
)]
fn parses_valid_owner_repo(input: &str) {
    let t: Target = input.parse().unwrap();
    assert_eq!(t.to_string(), input);
}

#[parameterized(
    no_slash = { "zero" },
    empty_owner = { "/zero" },
    empty_repo = { "crashappsec/" },
    double_slash = { "crashappsec/zero/extra" },
)]
fn rejects_malformed_input(input: &str) {
    assert!(input.parse::<Target>().is_err());
}
