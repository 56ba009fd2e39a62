//! CLI integration tests against the paper environment.

mod support;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use support::config::{paper_config_with_secondary, write_temp_config, PAPER_CONFIG};

const MARKET: &str = "0x3333333333333333333333333333333333333333";
const SINGLE_MARKET: &str = "0x3434343434343434343434343434343434343434";
const STRANGER: &str = "0x9999999999999999999999999999999999999999";
const HALF_PRICE: &str = "500000000000000000000";

fn sentinel() -> Command {
    let mut cmd = cargo_bin_cmd!("sentinel");
    cmd.env_remove("SENTINEL_KEEPER").env_remove("RUST_LOG");
    cmd
}

/// JSON records printed on stdout, skipping anything that is not JSON.
fn records(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect()
}

fn record<'a>(records: &'a [Value], kind: &str) -> &'a Value {
    records
        .iter()
        .find(|r| r["type"] == kind)
        .map(|r| &r["payload"])
        .unwrap_or_else(|| panic!("no {kind} record in {records:?}"))
}

#[test]
fn help_lists_commands() {
    sentinel()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("handle"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn config_validate_accepts_paper_config() {
    let (_dir, path) = write_temp_config(PAPER_CONFIG);

    sentinel()
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Config file is valid"));
}

#[test]
fn config_validate_names_the_bad_field() {
    let invalid = PAPER_CONFIG.replacen("poll_interval_secs = 5", "poll_interval_secs = 0", 1);
    let (_dir, path) = write_temp_config(&invalid);

    sentinel()
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("poll_interval_secs"));
}

#[test]
fn missing_config_fails() {
    let dir = tempfile::tempdir().unwrap();

    sentinel()
        .args(["check", MARKET, "--config"])
        .arg(dir.path().join("absent.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn check_reports_aligned_prices() {
    let (_dir, path) = write_temp_config(PAPER_CONFIG);

    let output = sentinel()
        .args(["--json", "check", MARKET, "--config"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let records = records(&output.stdout);
    let payload = record(&records, "deviation");
    assert_eq!(payload["report"]["has_deviation"], Value::Bool(false));
    assert_eq!(payload["report"]["threshold"], 10);
}

#[test]
fn handle_restricts_single_pool_market_on_low_skew() {
    let (_dir, path) = write_temp_config(&paper_config_with_secondary(HALF_PRICE));

    let output = sentinel()
        .args(["--json", "handle", SINGLE_MARKET, "--config"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let records = records(&output.stdout);
    let payload = record(&records, "transition");
    let actions: Vec<&str> = payload["actions"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|a| a["action"].as_str())
        .collect();
    assert!(actions.contains(&"collateral_factor_zeroed"));
    assert!(actions.contains(&"supply_paused"));
    assert_eq!(payload["state"]["cf_modified"], Value::Bool(true));
}

#[test]
fn handle_rejects_untrusted_keeper() {
    let (_dir, path) = write_temp_config(&paper_config_with_secondary(HALF_PRICE));

    sentinel()
        .args(["handle", MARKET, "--keeper", STRANGER, "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a trusted keeper"));
}

#[test]
fn run_once_handles_every_market() {
    let (_dir, path) = write_temp_config(&paper_config_with_secondary(HALF_PRICE));

    let output = sentinel()
        .args(["--json", "run", "--once", "--config"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let changed = records(&output.stdout)
        .into_iter()
        .find(|r| r["type"] == "field" && r["payload"]["label"] == "Changed")
        .expect("Changed field");
    assert_eq!(changed["payload"]["value"], "2");
}

#[test]
fn run_rejects_zero_interval() {
    let (_dir, path) = write_temp_config(PAPER_CONFIG);

    sentinel()
        .args(["run", "--once", "--interval", "0", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("interval"));
}
