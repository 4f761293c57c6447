//! End-to-end CLI tests against a scratch lecture directory.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn stylefix() -> Command {
    Command::cargo_bin("stylefix").expect("stylefix binary")
}

const DATABASE: &str = r#"# Lecture Style Guide

## Version: 1.0

<!-- GROUP:WRITING-START -->
### Rule: qe-writing-001
**Category:** rule
**Title:** Fix common typos

### Rule: qe-writing-002
**Category:** style
**Title:** Prefer plain language
<!-- GROUP:WRITING-END -->

<!-- GROUP:MATH-START -->
### Rule: qe-math-001
**Category:** rule
**Title:** Unicode Greek letters
<!-- GROUP:MATH-END -->
"#;

const LECTURE: &str = "# Growth\n\nTeh parameter $\\alpha$ sets the growth rate.\n\nWe utilize a simple model.\n";

fn create_temp_lecture() -> TempDir {
    let td = tempfile::tempdir().expect("tempdir");
    let root = td.path();

    fs::write(root.join("style-guide-database.md"), DATABASE).unwrap();
    fs::write(root.join("lecture.md"), LECTURE).unwrap();
    fs::create_dir_all(root.join("responses")).unwrap();
    fs::write(
        root.join("responses").join("qe-writing-001.json"),
        r#"{"summary":"one typo","violations":[{"rule_id":"qe-writing-001","current_text":"Teh parameter","suggested_fix":"The parameter"}]}"#,
    )
    .unwrap();
    fs::write(
        root.join("responses").join("qe-writing-002.md"),
        "### Violation 1: qe-writing-002 - Prefer plain language\n- **Current text:** `We utilize a simple model.`\n- **Suggested fix:** `We use a simple model.`\n",
    )
    .unwrap();
    fs::write(
        root.join("responses").join("qe-math-001.json"),
        r#"[{"current_text":"$\\alpha$","suggested_fix":"α"}]"#,
    )
    .unwrap();

    td
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

#[test]
fn test_check_writes_artifacts_without_touching_document() {
    let temp = create_temp_lecture();

    stylefix()
        .current_dir(temp.path())
        .args(["check", "lecture.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 fixes applied"))
        .stdout(predicate::str::contains("1 for human review"))
        .stdout(predicate::str::contains("run with --fix"));

    assert_eq!(read(temp.path(), "lecture.md"), LECTURE);
    let fixed = read(temp.path(), "artifacts/stylefix/document.fixed.md");
    assert_eq!(
        fixed,
        "# Growth\n\nThe parameter α sets the growth rate.\n\nWe utilize a simple model.\n"
    );
    let report: serde_json::Value =
        serde_json::from_str(&read(temp.path(), "artifacts/stylefix/report.json")).unwrap();
    assert_eq!(report["schema"], "stylefix.report.v1");
    assert_eq!(report["summary"]["fixes_applied"], 2);
    assert_eq!(report["human_review"][0]["rule_id"], "qe-writing-002");
    assert!(read(temp.path(), "artifacts/stylefix/patch.diff").contains("+The parameter α"));
}

#[test]
fn test_check_fix_updates_document() {
    let temp = create_temp_lecture();

    stylefix()
        .current_dir(temp.path())
        .args(["check", "lecture.md", "--fix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("updated lecture.md"));

    assert!(read(temp.path(), "lecture.md").starts_with("# Growth\n\nThe parameter α"));
}

#[test]
fn test_check_categories_and_out_dir() {
    let temp = create_temp_lecture();

    stylefix()
        .current_dir(temp.path())
        .args(["check", "lecture.md", "--categories", "math", "--out-dir", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 rules"));

    let fixed = read(temp.path(), "out/document.fixed.md");
    assert!(fixed.contains("Teh parameter α"));
}

#[test]
fn test_check_parallel_mode_is_recorded() {
    let temp = create_temp_lecture();

    stylefix()
        .current_dir(temp.path())
        .args(["check", "lecture.md", "--parallel"])
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_str(&read(temp.path(), "artifacts/stylefix/report.json")).unwrap();
    assert_eq!(report["run"]["mode"], "parallel");
}

#[test]
fn test_config_file_supplies_defaults() {
    let temp = create_temp_lecture();
    fs::write(
        temp.path().join("stylefix.toml"),
        "[rules]\ncategories = [\"writing\"]\n\n[output]\nout_dir = \"reports\"\n",
    )
    .unwrap();

    stylefix()
        .current_dir(temp.path())
        .args(["check", "lecture.md"])
        .assert()
        .success();

    let fixed = read(temp.path(), "reports/document.fixed.md");
    assert!(fixed.contains("The parameter $\\alpha$"));
}

#[test]
fn test_unknown_category_fails() {
    let temp = create_temp_lecture();

    stylefix()
        .current_dir(temp.path())
        .args(["check", "lecture.md", "--categories", "typography"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_missing_document_fails() {
    let temp = create_temp_lecture();

    stylefix()
        .current_dir(temp.path())
        .args(["check", "absent.md"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_broken_recording_is_a_warning_not_an_error() {
    let temp = create_temp_lecture();
    fs::write(
        temp.path().join("responses").join("qe-math-001.json"),
        "{ truncated",
    )
    .unwrap();

    stylefix()
        .current_dir(temp.path())
        .args(["check", "lecture.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 failed"))
        .stdout(predicate::str::contains("rule evaluation failed"));
}

#[test]
fn test_list_rules_text() {
    let temp = create_temp_lecture();

    stylefix()
        .current_dir(temp.path())
        .arg("list-rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("qe-math-001"))
        .stdout(predicate::str::contains("3 rules (2 actionable)"));
}

#[test]
fn test_list_rules_json_by_category() {
    let temp = create_temp_lecture();

    let output = stylefix()
        .current_dir(temp.path())
        .args(["list-rules", "--format", "json", "--category", "math"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let rules: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rules.as_array().unwrap().len(), 1);
    assert_eq!(rules[0]["rule_id"], "qe-math-001");
    assert_eq!(rules[0]["category"], "actionable");
}

#[test]
fn test_list_rules_invalid_format() {
    let temp = create_temp_lecture();

    stylefix()
        .current_dir(temp.path())
        .args(["list-rules", "--format", "yaml"])
        .assert()
        .failure();
}
