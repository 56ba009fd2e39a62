//! Kept in its own binary: it mutates the process environment.

use alloy_primitives::Address;
use sentinel::error::{ConfigError, Error};
use sentinel::infrastructure::config::settings::{Config, KEEPER_ENV};

const CONFIG: &str = r#"
[sentinel]
multi_pool_comptroller = "0x1111111111111111111111111111111111111111"
keeper = "0x5555555555555555555555555555555555555555"
"#;

#[test]
fn keeper_env_overrides_config() {
    std::env::set_var(KEEPER_ENV, "0x7777777777777777777777777777777777777777");
    let config = Config::parse_toml(CONFIG);

    std::env::set_var(KEEPER_ENV, "not-an-address");
    let invalid = Config::parse_toml(CONFIG);
    std::env::remove_var(KEEPER_ENV);

    assert_eq!(
        config.unwrap().sentinel.keeper,
        Some(Address::new([0x77; 20]))
    );
    assert!(matches!(
        invalid,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "SENTINEL_KEEPER",
            ..
        }))
    ));
    assert_eq!(
        Config::parse_toml(CONFIG).unwrap().sentinel.keeper,
        Some(Address::new([0x55; 20]))
    );
}
