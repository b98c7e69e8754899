//! Integration tests for the `jsmv` binary

use assert_cmd::Command;
use jsmv_test_support::TestWorkspace;
use predicates::prelude::*;

fn jsmv_cmd(workspace: &TestWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("jsmv").unwrap();
    cmd.current_dir(workspace.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn sample_project() -> TestWorkspace {
    let workspace = TestWorkspace::new();
    workspace.create_package_json("sample");
    workspace.create_file("src/utils.js", "export const x = 1;\n");
    workspace.create_file("src/app.js", "const utils = require('./utils');\n");
    workspace
}

#[test]
fn test_move_prints_updated_references() {
    let workspace = sample_project();

    jsmv_cmd(&workspace)
        .args(["src/utils.js", "src/helpers/utils.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains("update file: src/app.js"))
        .stdout(predicate::str::contains("  ./utils\n->./helpers/utils"))
        .stdout(predicate::str::contains("Moved src/utils.js -> src/helpers/utils.js"));

    assert!(workspace.file_exists("src/helpers/utils.js"));
    assert_eq!(
        workspace.read_file("src/app.js"),
        "const utils = require('./helpers/utils');\n"
    );
}

#[test]
fn test_dry_run_json_report() {
    let workspace = sample_project();

    let output = jsmv_cmd(&workspace)
        .args([
            "--dry-run",
            "--format",
            "json",
            "src/utils.js",
            "src/helpers/utils.js",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["dryRun"], true);
    assert_eq!(report["isDirectory"], false);
    assert_eq!(report["rewrites"][0]["replacement"], "./helpers/utils");

    assert!(workspace.file_exists("src/utils.js"));
    assert!(!workspace.file_exists("src/helpers"));
}

#[test]
fn test_missing_source_fails_with_usage() {
    let workspace = sample_project();

    jsmv_cmd(&workspace)
        .args(["src/nope.js", "src/helpers/nope.js"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Source does not exist"))
        .stderr(predicate::str::contains("Usage: jsmv"));
}

#[test]
fn test_missing_arguments_rejected() {
    let workspace = sample_project();

    jsmv_cmd(&workspace)
        .arg("src/utils.js")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_explicit_root_option() {
    let workspace = TestWorkspace::new();
    workspace.create_file("web/src/a.js", "");
    workspace.create_file("web/src/main.js", "import a from './a';\n");

    jsmv_cmd(&workspace)
        .args(["--root", "web", "web/src/a.js", "web/lib/a.js"])
        .assert()
        .success();

    assert_eq!(
        workspace.read_file("web/src/main.js"),
        "import a from '../lib/a';\n"
    );
}
