//! CLI integration tests using the real ipa-analyze binary

mod common;

use common::TestWorkspace;
use predicates::prelude::*;

#[test]
fn test_help_output() {
    TestWorkspace::new()
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Size breakdown of iOS application archives"))
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("deps"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_analyze_help_lists_outputs() {
    TestWorkspace::new()
        .cmd()
        .args(["analyze", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--txt"))
        .stdout(predicate::str::contains("--md"))
        .stdout(predicate::str::contains("--json-out"))
        .stdout(predicate::str::contains("--extracted"));
}

#[test]
fn test_version_output() {
    TestWorkspace::new()
        .cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ipa-analyze"))
        .stdout(predicate::str::contains("Build info"));
}

#[test]
fn test_completions_bash() {
    TestWorkspace::new()
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ipa-analyze"));
}

#[test]
fn test_completions_unknown_shell() {
    TestWorkspace::new()
        .cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown shell: tcsh"));
}

#[test]
fn test_missing_subcommand_fails() {
    TestWorkspace::new().cmd().assert().failure();
}

#[test]
fn test_analyze_requires_archive() {
    TestWorkspace::new()
        .cmd()
        .arg("analyze")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<ARCHIVE>"));
}

#[test]
fn test_keep_extracted_conflicts_with_extracted() {
    TestWorkspace::new()
        .cmd()
        .args(["analyze", "App.ipa", "--extracted", "tree", "--keep-extracted"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
