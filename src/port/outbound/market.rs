//! Market lookup port.

use alloy_primitives::Address;
use thiserror::Error;

/// Failure to resolve a market's metadata.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("unknown market {0}")]
    UnknownMarket(Address),

    #[error("market lookup unavailable: {0}")]
    Unavailable(String),
}

/// Resolves static metadata of lending markets.
pub trait MarketDirectory: Send + Sync {
    /// Underlying token of `market`.
    fn underlying(&self, market: Address) -> Result<Address, LookupError>;

    /// Identity of the comptroller that governs `market`.
    fn comptroller(&self, market: Address) -> Result<Address, LookupError>;
}
