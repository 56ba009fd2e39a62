//! Price feed port.
//!
//! The sentinel reads one price from a primary (resilient, multi-source) feed
//! and one from a secondary (DEX-derived) feed. Both return values in the
//! `36 - token decimals` fixed-point convention.

use alloy_primitives::{Address, U256};
use thiserror::Error;

/// Failure to obtain a price. Never treated as a zero reading.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// The feed has no route to a price for this token.
    #[error("no price route for token {token}")]
    NoRoute { token: Address },

    /// The feed could not be reached.
    #[error("feed unavailable: {0}")]
    Unavailable(String),
}

/// Source of token prices.
///
/// Implementations must be thread-safe; calls are synchronous round-trips.
pub trait PriceFeed: Send + Sync {
    /// Human-readable feed name for logs and errors.
    fn name(&self) -> &str;

    /// Current price for `token`.
    fn price(&self, token: Address) -> Result<U256, FeedError>;
}
