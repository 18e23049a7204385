use assert_cmd::Command;
use predicates::prelude::*;

fn write_context(dir: &tempfile::TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("context.json");
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn evaluates_a_true_rule_and_prints_true() {
    let dir = tempfile::tempdir().unwrap();
    let context_path = write_context(&dir, r#"{"x": 10}"#);

    Command::cargo_bin("ruleq-cli")
        .unwrap()
        .arg("x eq 10")
        .arg("--context")
        .arg(&context_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("true"));
}

#[test]
fn evaluates_a_false_rule_and_prints_false() {
    let dir = tempfile::tempdir().unwrap();
    let context_path = write_context(&dir, r#"{"x": 5}"#);

    Command::cargo_bin("ruleq-cli")
        .unwrap()
        .arg("x eq 10")
        .arg("--context")
        .arg(&context_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("false"));
}

#[test]
fn a_compile_error_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let context_path = write_context(&dir, r#"{}"#);

    Command::cargo_bin("ruleq-cli")
        .unwrap()
        .arg("x eq")
        .arg("--context")
        .arg(&context_path)
        .assert()
        .failure();
}
