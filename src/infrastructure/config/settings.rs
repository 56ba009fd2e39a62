//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file; the keeper identity may be
//! overridden with the `SENTINEL_KEEPER` environment variable.
//!
//! # Example
//!
//! ```no_run
//! use sentinel::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::Address;
use serde::Deserialize;

use super::logging::LoggingConfig;
use super::paper::{parse_u256, ComptrollerKind, PaperConfig};
use super::sentinel::{MarketEntry, SentinelConfig, TokenEntry};
use crate::domain::TokenMonitorConfig;
use crate::error::{ConfigError, Result};

/// Environment variable overriding `[sentinel] keeper`.
pub const KEEPER_ENV: &str = "SENTINEL_KEEPER";

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Core sentinel settings.
    pub sentinel: SentinelConfig,

    /// Keepers trusted at startup.
    #[serde(default)]
    pub keepers: Vec<Address>,

    /// Monitoring configs applied at startup.
    #[serde(default)]
    pub tokens: Vec<TokenEntry>,

    /// Markets watched by the keeper loop.
    #[serde(default)]
    pub markets: Vec<MarketEntry>,

    /// In-memory comptrollers and prices.
    #[serde(default)]
    pub paper: PaperConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Ok(raw) = std::env::var(KEEPER_ENV) {
            let keeper = Address::from_str(raw.trim()).map_err(|e| ConfigError::InvalidValue {
                field: KEEPER_ENV,
                reason: e.to_string(),
            })?;
            config.sentinel.keeper = Some(keeper);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is malformed, or fails
    /// validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.sentinel.poll_interval_secs)
    }

    /// Validated token configs.
    pub fn token_configs(&self) -> Result<Vec<(Address, TokenMonitorConfig)>> {
        self.tokens
            .iter()
            .map(|entry| {
                TokenMonitorConfig::try_new(entry.deviation_percent, entry.enabled)
                    .map(|config| (entry.token, config))
                    .map_err(|e| {
                        ConfigError::InvalidValue {
                            field: "deviation_percent",
                            reason: e.to_string(),
                        }
                        .into()
                    })
            })
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if self.sentinel.multi_pool_comptroller.is_zero() {
            return Err(ConfigError::MissingField {
                field: "multi_pool_comptroller",
            }
            .into());
        }
        if self.sentinel.poll_interval_secs == 0 {
            return Err(invalid("poll_interval_secs", "must be greater than 0"));
        }
        if self.sentinel.admins.iter().any(|a| a.is_zero()) {
            return Err(invalid("admins", "zero address is not allowed"));
        }
        if self.keepers.iter().any(|k| k.is_zero()) {
            return Err(invalid("keepers", "zero address is not allowed"));
        }
        if self.tokens.iter().any(|t| t.token.is_zero()) {
            return Err(invalid("token", "zero address is not allowed"));
        }
        self.token_configs()?;

        let kinds = self.comptroller_kinds()?;
        for market in &self.markets {
            if market.address.is_zero() || market.underlying.is_zero() {
                return Err(invalid("markets", "zero address is not allowed"));
            }
            if !kinds.contains_key(&market.comptroller) {
                return Err(invalid(
                    "comptroller",
                    &format!(
                        "market {} uses unknown comptroller {}",
                        market.address, market.comptroller
                    ),
                ));
            }
        }

        self.validate_paper(&kinds)
    }

    /// Kind of every comptroller known to the configuration.
    ///
    /// The multi-pool comptroller is always known, even without a paper entry.
    pub fn comptroller_kinds(&self) -> Result<HashMap<Address, ComptrollerKind>> {
        let multi_pool = self.sentinel.multi_pool_comptroller;
        let mut kinds = HashMap::from([(multi_pool, ComptrollerKind::MultiPool)]);

        for entry in &self.paper.comptrollers {
            let is_multi_pool_address = entry.address == multi_pool;
            match entry.kind {
                ComptrollerKind::MultiPool if !is_multi_pool_address => {
                    return Err(invalid(
                        "kind",
                        &format!(
                            "{} is not the configured multi_pool_comptroller",
                            entry.address
                        ),
                    ));
                }
                ComptrollerKind::SinglePool if is_multi_pool_address => {
                    return Err(invalid(
                        "kind",
                        "multi_pool_comptroller cannot be single_pool",
                    ));
                }
                ComptrollerKind::MultiPool if entry.first_pool_id > entry.last_pool_id => {
                    return Err(invalid(
                        "first_pool_id",
                        "must not exceed last_pool_id",
                    ));
                }
                kind => {
                    kinds.insert(entry.address, kind);
                }
            }
        }
        Ok(kinds)
    }

    fn validate_paper(&self, kinds: &HashMap<Address, ComptrollerKind>) -> Result<()> {
        for price in &self.paper.prices {
            parse_u256("primary", &price.primary)?;
            parse_u256("secondary", &price.secondary)?;
        }
        for listing in &self.paper.listings {
            parse_u256("collateral_factor", &listing.collateral_factor)?;
            parse_u256("liquidation_threshold", &listing.liquidation_threshold)?;
            match kinds.get(&listing.comptroller) {
                Some(ComptrollerKind::MultiPool) if listing.pool_id.is_none() => {
                    return Err(ConfigError::MissingField { field: "pool_id" }.into());
                }
                Some(ComptrollerKind::SinglePool) if listing.pool_id.is_some() => {
                    return Err(invalid(
                        "pool_id",
                        "single_pool comptrollers have no pools",
                    ));
                }
                Some(_) => {}
                None => {
                    return Err(invalid(
                        "comptroller",
                        &format!("listing uses unknown comptroller {}", listing.comptroller),
                    ));
                }
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}
