//! Seeds for the in-memory (paper) environment.
//!
//! Fixed-point values are written as strings, decimal or `0x` hex, since
//! they routinely exceed TOML's integer range.

use std::str::FromStr;

use alloy_primitives::{Address, U256};
use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaperConfig {
    #[serde(default)]
    pub prices: Vec<PriceEntry>,
    #[serde(default)]
    pub comptrollers: Vec<ComptrollerEntry>,
    #[serde(default)]
    pub listings: Vec<ListingEntry>,
}

/// Primary and secondary price of a token.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceEntry {
    pub token: Address,
    pub primary: String,
    pub secondary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComptrollerKind {
    MultiPool,
    SinglePool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComptrollerEntry {
    pub address: Address,
    pub kind: ComptrollerKind,
    #[serde(default)]
    pub first_pool_id: u64,
    #[serde(default)]
    pub last_pool_id: u64,
}

/// Listing of a market in a comptroller (and pool, for multi-pool).
#[derive(Debug, Clone, Deserialize)]
pub struct ListingEntry {
    pub comptroller: Address,
    pub market: Address,
    #[serde(default)]
    pub pool_id: Option<u64>,
    pub collateral_factor: String,
    pub liquidation_threshold: String,
}

/// Parse a decimal or `0x` hex string into a `U256`.
pub fn parse_u256(field: &'static str, raw: &str) -> Result<U256, ConfigError> {
    U256::from_str(raw.trim()).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: format!("'{raw}' is not an unsigned 256-bit integer: {e}"),
    })
}
