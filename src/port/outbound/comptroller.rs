//! Comptroller (risk engine) ports.
//!
//! Two comptroller shapes back lending markets:
//!
//! - **multi-pool**: risk parameters are kept per pool (e-mode group); the
//!   collateral factor setter reports failure through a numeric result code.
//! - **single-pool**: one parameter pair per market; the setter fails by
//!   returning an error.
//!
//! Both expose the same action-pausing surface through [`Comptroller`].

use alloy_primitives::{Address, U256};
use thiserror::Error;

use crate::domain::{Action, PoolId, RiskParameters};

/// Result code returned by a multi-pool setter on success.
pub const NO_ERROR: u64 = 0;

/// Failure of a comptroller call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The call was rejected by the comptroller.
    #[error("comptroller reverted: {0}")]
    Reverted(String),

    /// The comptroller could not be reached.
    #[error("comptroller unavailable: {0}")]
    Unavailable(String),
}

/// Listing of a market in one pool of a multi-pool comptroller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolMarket {
    pub is_listed: bool,
    pub collateral_factor: U256,
    pub liquidation_threshold: U256,
}

impl PoolMarket {
    #[must_use]
    pub const fn params(&self) -> RiskParameters {
        RiskParameters::new(self.collateral_factor, self.liquidation_threshold)
    }
}

/// Listing of a market in a single-pool comptroller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarketListing {
    pub is_listed: bool,
    pub collateral_factor: U256,
    pub liquidation_threshold: U256,
}

impl MarketListing {
    #[must_use]
    pub const fn params(&self) -> RiskParameters {
        RiskParameters::new(self.collateral_factor, self.liquidation_threshold)
    }
}

/// Action-pausing surface shared by both comptroller shapes.
pub trait Comptroller: Send + Sync {
    /// Pause or unpause every `action` on every `market`. Idempotent.
    fn set_actions_paused(
        &self,
        markets: &[Address],
        actions: &[Action],
        paused: bool,
    ) -> Result<(), EngineError>;

    /// Whether `action` is currently paused on `market`.
    fn action_paused(&self, market: Address, action: Action) -> Result<bool, EngineError>;
}

/// Comptroller keeping risk parameters per pool.
pub trait MultiPoolComptroller: Comptroller {
    /// Lowest valid pool id.
    fn first_pool_id(&self) -> Result<PoolId, EngineError>;

    /// Highest valid pool id. Grows as pools are added.
    fn last_pool_id(&self) -> Result<PoolId, EngineError>;

    /// Listing of `market` in `pool`.
    fn pool_market(&self, pool: PoolId, market: Address) -> Result<PoolMarket, EngineError>;

    /// Set risk parameters of `market` in `pool`.
    ///
    /// Returns a result code; anything other than [`NO_ERROR`] is a rejection.
    fn set_collateral_factor(
        &self,
        pool: PoolId,
        market: Address,
        collateral_factor: U256,
        liquidation_threshold: U256,
    ) -> Result<u64, EngineError>;
}

/// Comptroller keeping one parameter pair per market.
pub trait SinglePoolComptroller: Comptroller {
    /// Listing of `market`.
    fn market(&self, market: Address) -> Result<MarketListing, EngineError>;

    /// Set risk parameters of `market`.
    fn set_collateral_factor(
        &self,
        market: Address,
        collateral_factor: U256,
        liquidation_threshold: U256,
    ) -> Result<(), EngineError>;
}
