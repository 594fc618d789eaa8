//! CLI smoke tests. Everything here runs without network access.

use assert_cmd::Command;
use predicates::prelude::*;

fn hubcap() -> Command {
    let mut cmd = Command::cargo_bin("hubcap").unwrap();
    // Keep the environment hermetic: no user config file, a dummy token.
    cmd.env("HUBCAP_CONFIG", "/nonexistent/hubcap-config.toml");
    cmd.env("GITHUB_TOKEN", "test-token");
    cmd
}

#[test]
fn list_prints_every_capability() {
    hubcap()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("search_repositories"))
        .stdout(predicate::str::contains("commit_files"))
        .stdout(predicate::str::contains("analyze_pull_request"));
}

#[test]
fn spec_prints_the_input_contract() {
    hubcap()
        .args(["spec", "commit_files"])
        .assert()
        .success()
        .stdout(predicate::str::contains("repo_full_name"))
        .stdout(predicate::str::contains("files"));
}

#[test]
fn spec_rejects_unknown_capability() {
    hubcap()
        .args(["spec", "launch_rockets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown capability"));
}

#[test]
fn invoke_rejects_unknown_capability() {
    hubcap()
        .args(["invoke", "launch_rockets", "{}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown capability"));
}

#[test]
fn invoke_renders_validation_errors_as_text() {
    // A validation failure is part of the rendered contract, not an exit
    // code: the process succeeds and the text names the missing field.
    hubcap()
        .args(["invoke", "commit_files", r#"{"branch": "main"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: Missing required field 'repo_full_name'.",
        ));
}

#[test]
fn help_mentions_the_subcommands() {
    hubcap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("invoke"))
        .stdout(predicate::str::contains("repl"))
        .stdout(predicate::str::contains("completion"));
}
