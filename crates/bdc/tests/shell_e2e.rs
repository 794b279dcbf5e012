#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// The shell with no config file and no ambient `BDC_*` settings.
fn bdc_cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("bdc"));
    cmd.arg("--config")
        .arg(temp.path().join("absent.toml"))
        .env("NO_COLOR", "1")
        .env_remove("BDC_LOG")
        .env_remove("BDC_SEED")
        .env_remove("BDC_ROOT_VALUE")
        .env_remove("BDC_NEW_NODE_VALUE")
        .env_remove("BDC_LOG_LEVEL")
        .env_remove("BDC_LOG_FORMAT");
    cmd
}

#[test]
fn test_stage_and_save_session() {
    let temp = TempDir::new().unwrap();
    bdc_cmd(&temp)
        .write_stdin("load 3 5 7\nadd 1\nrm 1\nrename 0 changed\nsave\ndb\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved: 3 updated, 1 created"))
        .stdout(predicate::str::contains("3 committed as 9"))
        .stdout(predicate::str::contains("[3] changed"))
        .stdout(predicate::str::contains("[9] New Node (deleted)"))
        .stdout(predicate::str::contains("[8] node_4_2 (deleted)"));
}

#[test]
fn test_cache_view_shows_both_identities() {
    let temp = TempDir::new().unwrap();
    bdc_cmd(&temp)
        .write_stdin("load 7\nload 0 1\nadd 2\ncache\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[0/7] node_4_1 (orphan)"))
        .stdout(predicate::str::contains("[1/0] root"))
        .stdout(predicate::str::contains("[3/-] New Node"));
}

#[test]
fn test_errors_do_not_end_the_session() {
    let temp = TempDir::new().unwrap();
    bdc_cmd(&temp)
        .write_stdin("rm 42\nfrobnicate\nload 0\ncache\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Node not found: 42"))
        .stderr(predicate::str::contains("frobnicate"))
        .stdout(predicate::str::contains("[0/0] root"));
}

#[test]
fn test_deleted_nodes_are_read_only() {
    let temp = TempDir::new().unwrap();
    bdc_cmd(&temp)
        .write_stdin("load 2\nrm 0\nrename 0 again\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("cannot be renamed"));
}

#[test]
fn test_quit_stops_reading() {
    let temp = TempDir::new().unwrap();
    bdc_cmd(&temp)
        .write_stdin("# scripted\nquit\nload 0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded").not());
}

#[test]
fn test_reset_discards_saved_changes() {
    let temp = TempDir::new().unwrap();
    bdc_cmd(&temp)
        .write_stdin("load 0\nrm 0\nsave\nreset\ndb\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reset: store has 9 node(s)"))
        .stdout(predicate::str::contains("[0] root\n"));
}

#[test]
fn test_json_output() {
    let temp = TempDir::new().unwrap();
    bdc_cmd(&temp)
        .args(["--output", "json"])
        .write_stdin("load 0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"level\": \"success\""))
        .stdout(predicate::str::contains("Loaded 0 as 0: root"));
}

#[test]
fn test_config_file_seed() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("bdc.toml");
    fs::write(&config, "seed = \"root\"\nroot_value = \"top\"\n").unwrap();

    Command::new(cargo_bin("bdc"))
        .arg("--config")
        .arg(&config)
        .env("NO_COLOR", "1")
        .env_remove("BDC_SEED")
        .env_remove("BDC_ROOT_VALUE")
        .write_stdin("db\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[0] top"))
        .stdout(predicate::str::contains("node_1_1").not());
}

#[test]
fn test_env_overrides_new_node_value() {
    let temp = TempDir::new().unwrap();
    bdc_cmd(&temp)
        .env("BDC_NEW_NODE_VALUE", "draft")
        .write_stdin("load 0\nadd 0\ncache\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/-] draft"));
}

#[test]
fn test_invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("bdc.toml");
    fs::write(&config, "seed = \"forest\"\n").unwrap();

    Command::new(cargo_bin("bdc"))
        .arg("--config")
        .arg(&config)
        .env_remove("BDC_SEED")
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}
