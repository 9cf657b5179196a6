// Regression tests for the fixcheck binary: exit codes and rendered output.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn put(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn fixcheck(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fixcheck").unwrap();
    cmd.arg("--root").arg(root).arg("--color").arg("never");
    cmd
}

#[test]
fn matching_file_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    put(dir.path(), "test/abtest/reference.ts", "/// <reference path=\"a.ts\" />\n");
    put(dir.path(), "test/expected/abtest/reference.ts", "/// <reference path=\"a.ts\" />\n");

    fixcheck(dir.path())
        .args(["file", "abtest/reference.ts"])
        .assert()
        .success()
        .stdout(contains("PASS").and(contains("passed 1")));
}

#[test]
fn mismatch_exits_one_with_diff_tool_hint() {
    let dir = tempfile::tempdir().unwrap();
    put(dir.path(), "test/es6/out.js", "let x = 2;\n");
    put(dir.path(), "test/expected/es6/out.js", "let x = 1;\n");

    fixcheck(dir.path())
        .args(["--diff-tool", "meld", "dir", "es6"])
        .assert()
        .code(1)
        .stdout(
            contains("Actual did not match expected.  Run this to compare:")
                .and(contains("meld \""))
                .and(contains("- let x = 1;"))
                .and(contains("+ let x = 2;")),
        );
}

#[test]
fn whitespace_flag_ignores_formatting() {
    let dir = tempfile::tempdir().unwrap();
    put(dir.path(), "test/abtest/out.js", "var a=1;");
    put(dir.path(), "test/expected/abtest/out.js", "var a = 1;\n");

    fixcheck(dir.path())
        .args(["file", "abtest/out.js"])
        .assert()
        .code(1);
    fixcheck(dir.path())
        .args(["file", "abtest/out.js", "--ignore-whitespace"])
        .assert()
        .success();
}

#[test]
fn absent_fails_when_file_exists() {
    let dir = tempfile::tempdir().unwrap();
    put(dir.path(), "test/noEmitOnError/testNoEmitOnError_true.js", "");

    fixcheck(dir.path())
        .args(["absent", "test/noEmitOnError/testNoEmitOnError_true.js"])
        .assert()
        .code(1)
        .stdout(contains("Expected this file to not exist:"));
}

#[test]
fn json_format_reports_summary() {
    let dir = tempfile::tempdir().unwrap();
    put(dir.path(), "test/expected/index/index.ts", "export * from './a';\n");

    let output = fixcheck(dir.path())
        .args(["--format", "json", "dir", "index"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["failed"], 1);
    assert_eq!(report["results"][0]["failures"][0]["kind"], "error");
}

#[test]
fn broken_manifest_exits_two_with_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("suite.yaml");
    fs::write(&manifest, "name: [unclosed\n").unwrap();

    Command::cargo_bin("fixcheck")
        .unwrap()
        .args(["--color", "never", "run", "--manifest"])
        .arg(&manifest)
        .assert()
        .code(2)
        .stderr(contains("fixcheck::manifest::syntax"));
}

#[test]
fn list_shows_builtin_cases() {
    Command::cargo_bin("fixcheck")
        .unwrap()
        .arg("list")
        .assert()
        .success()
        .stdout(
            contains("grunt-ts (21 cases)")
                .and(contains("noEmitOnError"))
                .and(contains("absent test/noEmitOnError/testNoEmitOnError_true.js")),
        );
}

#[test]
fn color_always_colors_piped_output() {
    let dir = tempfile::tempdir().unwrap();
    put(dir.path(), "test/abtest/out.js", "var a = 1;\n");
    put(dir.path(), "test/expected/abtest/out.js", "var a = 1;\n");

    Command::cargo_bin("fixcheck")
        .unwrap()
        .arg("--root")
        .arg(dir.path())
        .args(["--color", "always", "file", "abtest/out.js"])
        .env_remove("NO_COLOR")
        .env("TERM", "xterm")
        .assert()
        .success()
        .stdout(contains("\u{1b}["));
}
