//! Configuration files shared by config and CLI tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A complete paper configuration.
///
/// Market `0x33..` sits on the multi-pool comptroller (pools 0..=2, listed
/// in pools 0 and 2); market `0x34..` sits on a single-pool comptroller.
/// Prices start aligned.
pub const PAPER_CONFIG: &str = r#"
keepers = ["0x5656565656565656565656565656565656565656"]

[logging]
level = "warn"
format = "pretty"

[sentinel]
multi_pool_comptroller = "0x1111111111111111111111111111111111111111"
keeper = "0x5555555555555555555555555555555555555555"
poll_interval_secs = 5
admins = ["0x6666666666666666666666666666666666666666"]

[[tokens]]
token = "0x2222222222222222222222222222222222222222"
deviation_percent = 10

[[markets]]
address = "0x3333333333333333333333333333333333333333"
underlying = "0x2222222222222222222222222222222222222222"
comptroller = "0x1111111111111111111111111111111111111111"

[[markets]]
address = "0x3434343434343434343434343434343434343434"
underlying = "0x2222222222222222222222222222222222222222"
comptroller = "0x1212121212121212121212121212121212121212"

[[paper.comptrollers]]
address = "0x1111111111111111111111111111111111111111"
kind = "multi_pool"
first_pool_id = 0
last_pool_id = 2

[[paper.comptrollers]]
address = "0x1212121212121212121212121212121212121212"
kind = "single_pool"

[[paper.prices]]
token = "0x2222222222222222222222222222222222222222"
primary = "1000000000000000000000"
secondary = "1000000000000000000000"

[[paper.listings]]
comptroller = "0x1111111111111111111111111111111111111111"
market = "0x3333333333333333333333333333333333333333"
pool_id = 0
collateral_factor = "800000000000000000"
liquidation_threshold = "850000000000000000"

[[paper.listings]]
comptroller = "0x1111111111111111111111111111111111111111"
market = "0x3333333333333333333333333333333333333333"
pool_id = 2
collateral_factor = "900000000000000000"
liquidation_threshold = "930000000000000000"

[[paper.listings]]
comptroller = "0x1212121212121212121212121212121212121212"
market = "0x3434343434343434343434343434343434343434"
collateral_factor = "700000000000000000"
liquidation_threshold = "750000000000000000"
"#;

/// `PAPER_CONFIG` with the secondary price replaced by `secondary`.
pub fn paper_config_with_secondary(secondary: &str) -> String {
    PAPER_CONFIG.replacen(
        "secondary = \"1000000000000000000000\"",
        &format!("secondary = \"{secondary}\""),
        1,
    )
}

/// Write `contents` to `config.toml` inside a fresh temporary directory.
///
/// The directory is removed when the returned guard is dropped.
pub fn write_temp_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    (dir, path)
}
