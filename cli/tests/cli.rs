use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write test file");
}

fn flatjson() -> Command {
    Command::cargo_bin("flatjson").expect("binary builds")
}

#[test]
fn pretty_prints_by_default() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.json");
    write_file(&input, r#"{"name":"Ada","age":37}"#);

    flatjson()
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("\"name\": \"Ada\"").and(contains("\"age\": 37")));
}

#[test]
fn compact_round_trips() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.json");
    write_file(&input, r#"{"items":[1,2.5,null,true]}"#);

    flatjson()
        .arg(&input)
        .arg("--compact")
        .assert()
        .success()
        .stdout("{\"items\":[1,2.5,null,true]}\n");
}

#[test]
fn check_mode_is_silent_on_success() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.json");
    write_file(&input, "[1, 2, 3]");

    flatjson()
        .arg(&input)
        .arg("--check")
        .assert()
        .success()
        .stdout("")
        .stderr("");
}

#[test]
fn reads_stdin_when_no_path_given() {
    flatjson()
        .arg("--compact")
        .write_stdin("[true]")
        .assert()
        .success()
        .stdout("[true]\n");
}

#[test]
fn reports_error_with_location() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.json");
    write_file(&input, "[1,]");

    flatjson()
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("expected value at line 1, column 4"));
}

#[test]
fn bad_root_is_rejected() {
    flatjson()
        .write_stdin("42")
        .assert()
        .failure()
        .stderr(contains("document root must be object or array"));
}
