//! CLI help and usage output.

use crate::prelude::*;

#[test]
fn no_args_shows_usage_and_exits_nonzero() {
    cli().fails().stderr_has("Usage:");
}

#[test]
fn help_shows_usage() {
    cli().args(&["--help"]).passes().stdout_has("Usage:");
}

#[test]
fn help_lists_every_subcommand() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("hydrate")
        .stdout_has("scan")
        .stdout_has("status")
        .stdout_has("refresh")
        .stdout_has("clean")
        .stdout_has("watch")
        .stdout_has("list");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn scan_help_documents_scanner_override() {
    cli().args(&["scan", "--help"]).passes().stdout_has("--scanner");
}
