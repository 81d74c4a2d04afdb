use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const INPUT: &str = "id,name,age,city,salary\n\
                     1,John Doe,28,New York,70000\n\
                     2,Jane Smith,34,Los Angeles,80000\n\
                     3,Bob Johnson,45,Chicago,90000\n\
                     4,Alice Brown,29,Houston,85000\n\
                     5,Charlie Brown,,Phoenix,75000\n\
                     6,Eve Davis,38,Philadelphia,95000\n";

fn write_input(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("csv-etl").unwrap();
    cmd.env_remove("INPUT_FILE")
        .env_remove("OUTPUT_FILE")
        .env_remove("RUST_LOG");
    cmd
}

fn run_paths(input: &Path, output: &Path) -> assert_cmd::assert::Assert {
    cmd().arg("--input").arg(input).arg("--output").arg(output).assert()
}

#[test]
fn cleans_and_derives_columns() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "input_data.csv", INPUT);
    let output = dir.path().join("output").join("output_data.csv");

    run_paths(&input, &output)
        .success()
        .stdout(predicate::str::contains("Rows written: 5"))
        .stderr(predicate::str::contains("data extraction successful"))
        .stderr(predicate::str::contains("data transformation successful"))
        .stderr(predicate::str::contains("data loaded successfully"));

    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "id,name,age,city,salary,tax,net_salary");
    assert_eq!(lines[1], "1,John Doe,28,New York,70000,7000.0,63000.0");
    assert_eq!(lines.len(), 6);
    assert!(!written.contains("Charlie Brown"));
}

#[test]
fn reruns_are_byte_identical() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "in.csv", INPUT);
    let output = dir.path().join("out.csv");

    run_paths(&input, &output).success();
    let first = fs::read(&output).unwrap();
    run_paths(&input, &output).success();
    assert_eq!(first, fs::read(&output).unwrap());
}

#[test]
fn paths_come_from_environment() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "env_in.csv", INPUT);
    let output = dir.path().join("env_out.csv");

    cmd()
        .env("INPUT_FILE", &input)
        .env("OUTPUT_FILE", &output)
        .assert()
        .success();
    assert!(output.exists());
}

#[test]
fn missing_input_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.csv");

    run_paths(&dir.path().join("nonexistent_file.csv"), &output)
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error in data extraction"))
        .stderr(predicate::str::contains("data transformation successful").not())
        .stderr(predicate::str::contains("data loaded successfully").not());
    assert!(!output.exists());
}

#[test]
fn missing_salary_column_writes_no_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "in.csv", "id,name\n1,John\n2,Jane\n");
    let output = dir.path().join("out.csv");

    run_paths(&input, &output)
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error in data transformation"))
        .stderr(predicate::str::contains("salary"));
    assert!(!output.exists());
}

#[test]
fn header_only_input_produces_header_only_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "in.csv", "id,name,salary\n");
    let output = dir.path().join("out.csv");

    run_paths(&input, &output).success();
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "id,name,salary,tax,net_salary\n"
    );
}

#[test]
fn unwritable_destination_fails_load() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "in.csv", INPUT);
    let blocker = write_input(&dir, "file_not_dir", "");

    run_paths(&input, &blocker.join("out.csv"))
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error in data loading"));
}

#[test]
fn no_create_dirs_requires_existing_directory() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "in.csv", INPUT);
    let output = dir.path().join("missing").join("out.csv");

    cmd()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--no-create-dirs")
        .assert()
        .failure();
    assert!(!output.parent().unwrap().exists());
}

#[test]
fn tsv_input_round_trips_with_tabs() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "in.tsv", "name\tsalary\nJohn\t70000\n");
    let output = dir.path().join("out.tsv");

    run_paths(&input, &output).success();
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "name\tsalary\ttax\tnet_salary\nJohn\t70000\t7000.0\t63000.0\n"
    );
}

#[test]
fn json_summary() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "in.csv", INPUT);
    let output = dir.path().join("out.csv");

    let assert = cmd()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--format", "json"])
        .assert()
        .success();

    let summary: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(summary["rows_read"], 6);
    assert_eq!(summary["rows_dropped"], 1);
    assert_eq!(summary["rows_written"], 5);
    assert_eq!(summary["columns"][6], "net_salary");
}

#[test]
fn default_input_is_project_sample() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.csv");

    cmd().env("OUTPUT_FILE", &output).assert().success();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().count(), 6);
    assert!(written.contains("Eve Davis,38,Philadelphia,95000,9500.0,85500.0"));
}

#[test]
fn failure_is_reported_with_logging_disabled() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.csv");

    cmd()
        .env("RUST_LOG", "off")
        .arg("-i")
        .arg(dir.path().join("nonexistent_file.csv"))
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error in data extraction"));
}

#[test]
fn failure_is_reported_once_with_default_logging() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.csv");

    let assert = run_paths(&dir.path().join("nonexistent_file.csv"), &output).failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert_eq!(stderr.matches("error in data extraction").count(), 1, "{}", stderr);
}

#[test]
fn rerun_on_own_output_succeeds() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "in.csv", INPUT);
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    run_paths(&input, &first).success();
    run_paths(&first, &second).success();
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}
