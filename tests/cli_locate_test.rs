//! Integration tests for `modesync locate`.

mod common;

use common::{MACOS_DB, TestEnv, XDG_DB};
use predicates::prelude::*;
use serde_json::{Value, json};

#[test]
fn test_locate_discovered() {
    let env = TestEnv::new();
    let db = env.create_db(XDG_DB, &json!({}));

    env.modesync()
        .arg("locate")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "{} (discovered)",
            db.display()
        )))
        .stdout(predicate::str::contains(format!(
            "- {}",
            env.path(MACOS_DB).display()
        )));
}

#[test]
fn test_locate_json() {
    let env = TestEnv::new();
    env.create_db(MACOS_DB, &json!({}));
    env.create_db(XDG_DB, &json!({}));

    let output = env.modesync().args(["locate", "--json"]).output().unwrap();
    assert!(output.status.success());

    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["path"], env.path(MACOS_DB).display().to_string());
    assert_eq!(result["source"], "discovered");
    let exists: Vec<bool> = result["candidates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["exists"].as_bool().unwrap())
        .collect();
    assert_eq!(exists, vec![true, false, true, false, false, false]);
}

#[test]
fn test_locate_reports_source_of_explicit_path() {
    let env = TestEnv::new();
    let db = env.create_db("custom.vscdb", &json!({}));

    env.modesync()
        .args(["locate", "--db"])
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("(cli)"));

    env.modesync()
        .env("MODESYNC_DB", &db)
        .arg("locate")
        .assert()
        .success()
        .stdout(predicate::str::contains("(env:MODESYNC_DB)"));
}

#[test]
fn test_locate_nothing_found() {
    let env = TestEnv::new();

    env.modesync()
        .arg("locate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cursor database not found"));
}

#[test]
fn test_malformed_config_is_reported() {
    let env = TestEnv::new();
    env.create_db(XDG_DB, &json!({}));
    env.write_config("output-format \"xml\"\n");

    env.modesync()
        .arg("locate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}
