//! Sentinel configuration: comptroller identity, keepers, tokens, markets.

use alloy_primitives::Address;
use serde::Deserialize;

/// Core sentinel settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SentinelConfig {
    /// Identity of the multi-pool comptroller; every other comptroller is
    /// treated as single-pool.
    pub multi_pool_comptroller: Address,

    /// Keeper identity the local keeper loop acts as.
    ///
    /// Overridden by the `SENTINEL_KEEPER` environment variable.
    #[serde(default)]
    pub keeper: Option<Address>,

    /// Seconds between keeper passes (default: 30).
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Callers granted every administrative operation.
    #[serde(default)]
    pub admins: Vec<Address>,
}

const fn default_poll_interval_secs() -> u64 {
    30
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            multi_pool_comptroller: Address::ZERO,
            keeper: None,
            poll_interval_secs: default_poll_interval_secs(),
            admins: Vec::new(),
        }
    }
}

/// Initial monitoring config for one token.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenEntry {
    pub token: Address,
    pub deviation_percent: u8,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

/// A market the keeper loop watches.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketEntry {
    pub address: Address,
    pub underlying: Address,
    pub comptroller: Address,
}
