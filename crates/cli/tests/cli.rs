use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn gosuggest() -> Command {
    let mut cmd = Command::cargo_bin("gosuggest").unwrap();
    cmd.arg("--log-stderr");
    cmd.env("GOSUGGEST_LOG", "warn");
    cmd
}

const STRUCT_SRC: &str = "package foo

type Point struct {
\tX int
\tY int
}
";

#[test]
fn constructor_replacement_on_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("point.go");
    std::fs::write(&path, STRUCT_SRC).unwrap();

    let offset = STRUCT_SRC.find("Point").unwrap();
    let out = gosuggest()
        .arg(format!("{},{}", path.display(), offset))
        .write_stdin(STRUCT_SRC)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["rng"]["start"]["ln"], 3);
    let lines = value["lns"].as_array().unwrap();
    assert_eq!(lines[0], "type Point struct {");
    assert!(lines.iter().any(|l| l == "func NewPoint("));
}

#[test]
fn line_col_target_matches_byte_offset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("point.go");
    std::fs::write(&path, STRUCT_SRC).unwrap();

    // "Point" starts at line 3, column 6.
    let out = gosuggest()
        .arg(format!("{},3,6", path.display()))
        .write_stdin(STRUCT_SRC)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["rng"]["start"]["ln"], 3);
}

#[test]
fn no_match_prints_nothing() {
    let src = "package foo

func caller() {
\tx := 5
\t_ = x
}
";
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.go");
    std::fs::write(&path, src).unwrap();

    gosuggest()
        .arg(format!("{},{}", path.display(), src.find('5').unwrap()))
        .write_stdin(src)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn malformed_target_fails() {
    gosuggest()
        .arg("just-a-path")
        .write_stdin("package foo\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("path,byte_offset"));
}

#[test]
fn out_of_range_line_col_fails() {
    gosuggest()
        .arg("main.go,99,1")
        .write_stdin("package foo\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the file"));
}
