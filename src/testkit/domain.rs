//! Well-known addresses and fixed-point builders used across tests.

use alloy_primitives::{Address, U256};

use crate::domain::RiskParameters;

/// Multi-pool comptroller identity.
pub const MULTI_POOL: Address = Address::new([0x11; 20]);
/// Single-pool comptroller identity.
pub const SINGLE_POOL: Address = Address::new([0x12; 20]);
/// Underlying token of both fixture markets.
pub const TOKEN: Address = Address::new([0x22; 20]);
/// Market governed by the multi-pool comptroller.
pub const MARKET: Address = Address::new([0x33; 20]);
/// Market governed by the single-pool comptroller.
pub const SINGLE_MARKET: Address = Address::new([0x34; 20]);
/// Trusted keeper.
pub const KEEPER: Address = Address::new([0x55; 20]);
/// Caller holding every administrative permission.
pub const ADMIN: Address = Address::new([0x66; 20]);
/// Caller holding no permission at all.
pub const STRANGER: Address = Address::new([0x99; 20]);

/// Build an address from a single repeated byte.
pub fn addr(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

/// `units` scaled to 18 decimals.
pub fn wad(units: u64) -> U256 {
    U256::from(units) * U256::from(10u64).pow(U256::from(18))
}

/// `percent` of one, scaled to 18 decimals.
pub fn percent_wad(percent: u64) -> U256 {
    U256::from(percent) * U256::from(10u64).pow(U256::from(16))
}

/// Collateral factor and liquidation threshold given in percent.
pub fn params(collateral_factor: u64, liquidation_threshold: u64) -> RiskParameters {
    RiskParameters::new(
        percent_wad(collateral_factor),
        percent_wad(liquidation_threshold),
    )
}
