use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn source_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".ams").tempfile().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

fn aimms_lex() -> Command {
    Command::cargo_bin("aimms-lex").unwrap()
}

#[test]
fn tokenize_prints_json_by_default() {
    let file = source_file("Parameter OD;\nOD := 1;\n");
    let output = aimms_lex()
        .arg("tokenize")
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let tokens: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tokens[0]["text"], "Parameter");
    assert_eq!(tokens[0]["category"], "keyword.declaration");
    assert_eq!(tokens[2]["category"], "name.parameter");
}

#[test]
fn tokenize_simple_format() {
    let file = source_file("P_Cost");
    aimms_lex()
        .args(["tokenize", "--format", "token-simple"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("0\tname.parameter\t\"P_Cost\"\n6\ttext\t\"\\n\"\n");
}

#[test]
fn tokenize_raw_skips_resolution() {
    let file = source_file("Parameter OD;\n");
    aimms_lex()
        .args(["tokenize", "--raw", "-f", "token-simple"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0\tkeyword.reserved\t\"Parameter\""))
        .stdout(predicate::str::contains("10\ttext\t\"OD\""));
}

#[test]
fn tokenize_reads_format_from_config() {
    let file = source_file("x");
    let mut config = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(config, "[output]\nformat = \"token-yaml\"").unwrap();

    aimms_lex()
        .arg("tokenize")
        .arg(file.path())
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("category: text"));
}

#[test]
fn tokenize_rejects_unknown_format() {
    let file = source_file("x");
    aimms_lex()
        .args(["tokenize", "--format", "ast-tag"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown format 'ast-tag'"));
}

#[test]
fn tokenize_missing_file_fails() {
    aimms_lex()
        .args(["tokenize", "/nonexistent/model.ams"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn declarations_lists_declared_names() {
    let file = source_file("Set Cities;\nParameter OD;\n");
    let output = aimms_lex()
        .arg("declarations")
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records[0]["name"], "Cities");
    assert_eq!(records[0]["keyword"], "Set");
    assert_eq!(records[1]["name"], "OD");
}

#[test]
fn info_lists_metadata() {
    aimms_lex()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("AIMMS"))
        .stdout(predicate::str::contains("*.ams"))
        .stdout(predicate::str::contains("reserved_keywords (version 1"));
}
