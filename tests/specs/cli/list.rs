//! `zero list` — enumerate registered scanners.

use crate::prelude::*;

#[test]
fn list_enumerates_every_builtin_scanner() {
    let home = Home::empty();
    home.zero()
        .args(&["list"])
        .passes()
        .stdout_has("sbom")
        .stdout_has("gitleaks")
        .stdout_has("osv")
        .stdout_has("trivy")
        .stdout_has("semgrep")
        .stdout_has("checkov");
}
