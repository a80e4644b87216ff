#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn roster_cmd(data: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("roster"));
    cmd.env("ROSTER_DATA", data.path().as_os_str())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_person_field_value_grid_workflow() {
    let data = TempDir::new().unwrap();

    roster_cmd(&data)
        .args(["person", "add", "Ana Pérez", "--email", "ana@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered Ana Pérez as #1"));

    roster_cmd(&data)
        .args(["person", "add", "Bea Gómez"])
        .assert()
        .success();

    roster_cmd(&data)
        .args(["field", "add", "Height", "number", "--required"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dynamic_1"));

    roster_cmd(&data)
        .args(["value", "set", "1", "1", "172"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stored value #1"));

    roster_cmd(&data)
        .args(["value", "set", "2", "1", "tall"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("number"));

    roster_cmd(&data)
        .args(["columns", "toggle", "dynamic_1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("now shown"));

    roster_cmd(&data)
        .args(["grid", "--field", "dynamic_1", "--min", "170", "--max", "180"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana Pérez"))
        .stdout(predicate::str::contains("172"))
        .stdout(predicate::str::contains("Bea").not())
        .stdout(predicate::str::contains("showing 1-1 of 1"));

    roster_cmd(&data)
        .args(["person", "show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Missing required: Height"));

    roster_cmd(&data)
        .args(["field", "rm", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted Height and 1 value(s)"));
}

#[test]
fn test_image_value_shows_file_name() {
    let data = TempDir::new().unwrap();
    let upload = data.path().join("a.png");
    fs::write(&upload, [0u8; 10]).unwrap();

    roster_cmd(&data).args(["person", "add", "Ana"]).assert().success();
    roster_cmd(&data)
        .args(["field", "add", "Photo", "image"])
        .assert()
        .success();
    roster_cmd(&data)
        .args(["value", "set", "1", "1", "--file", upload.to_str().unwrap()])
        .assert()
        .success();
    roster_cmd(&data)
        .args(["columns", "toggle", "dynamic_1"])
        .assert()
        .success();

    roster_cmd(&data)
        .args(["grid"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.png"));
}

#[test]
fn test_errors_exit_nonzero() {
    let data = TempDir::new().unwrap();

    roster_cmd(&data)
        .args(["person", "rm", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Owner not found: 9"));

    roster_cmd(&data)
        .args(["field", "add", "Size", "decimal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("decimal"));
}

#[test]
fn test_config_reads_data_dir_file() {
    let data = TempDir::new().unwrap();
    fs::write(data.path().join("roster.toml"), "page_size = 4\n").unwrap();

    roster_cmd(&data)
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page_size = 4"))
        .stdout(predicate::str::contains("preference_key = roster_selected_columns"));
}
