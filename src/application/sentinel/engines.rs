//! Resolution of a market's comptroller into one of the two shapes.

use std::collections::HashMap;
use std::sync::Arc;

use alloy_primitives::{Address, U256};
use tracing::warn;

use crate::domain::{Action, PoolId, PoolRange};
use crate::error::SentinelError;
use crate::port::outbound::comptroller::{
    EngineError, MarketListing, MultiPoolComptroller, PoolMarket, SinglePoolComptroller,
};

/// A comptroller resolved to its shape.
#[derive(Clone)]
pub enum RiskEngine {
    MultiPool(Arc<dyn MultiPoolComptroller>),
    SinglePool(Arc<dyn SinglePoolComptroller>),
}

impl RiskEngine {
    pub(crate) fn set_action_paused(
        &self,
        market: Address,
        action: Action,
        paused: bool,
    ) -> Result<(), SentinelError> {
        let markets = [market];
        let actions = [action];
        let result = match self {
            Self::MultiPool(c) => c.set_actions_paused(&markets, &actions, paused),
            Self::SinglePool(c) => c.set_actions_paused(&markets, &actions, paused),
        };
        result.map_err(|source| SentinelError::RiskEngine {
            operation: "set_actions_paused",
            source,
        })
    }

    pub(crate) fn action_paused(
        &self,
        market: Address,
        action: Action,
    ) -> Result<bool, SentinelError> {
        let result = match self {
            Self::MultiPool(c) => c.action_paused(market, action),
            Self::SinglePool(c) => c.action_paused(market, action),
        };
        result.map_err(|source| SentinelError::RiskEngine {
            operation: "action_paused",
            source,
        })
    }
}

/// Pool ranges wider than this are scanned but logged, since every pool is
/// read while the market lock is held.
pub const WIDE_POOL_RANGE: u64 = 1_024;

/// Currently valid pool range, read fresh from the comptroller.
pub(crate) fn pool_range(engine: &dyn MultiPoolComptroller) -> Result<PoolRange, SentinelError> {
    let first = engine.first_pool_id().map_err(engine_error("first_pool_id"))?;
    let last = engine.last_pool_id().map_err(engine_error("last_pool_id"))?;
    let range = PoolRange::new(first, last);
    if range.width() > WIDE_POOL_RANGE {
        warn!(
            first = first.get(),
            last = last.get(),
            width = range.width(),
            "Comptroller reports an unusually wide pool range"
        );
    }
    Ok(range)
}

pub(crate) fn pool_market(
    engine: &dyn MultiPoolComptroller,
    pool: PoolId,
    market: Address,
) -> Result<PoolMarket, SentinelError> {
    engine
        .pool_market(pool, market)
        .map_err(engine_error("pool_markets"))
}

/// Set parameters in one pool, normalizing a non-zero result code into an error.
pub(crate) fn set_pool_collateral_factor(
    engine: &dyn MultiPoolComptroller,
    pool: PoolId,
    market: Address,
    collateral_factor: U256,
    liquidation_threshold: U256,
) -> Result<(), SentinelError> {
    let code = engine
        .set_collateral_factor(pool, market, collateral_factor, liquidation_threshold)
        .map_err(engine_error("set_collateral_factor"))?;
    if code != crate::port::outbound::comptroller::NO_ERROR {
        return Err(SentinelError::CollateralFactorRejected { pool, code });
    }
    Ok(())
}

pub(crate) fn market_listing(
    engine: &dyn SinglePoolComptroller,
    market: Address,
) -> Result<MarketListing, SentinelError> {
    engine.market(market).map_err(engine_error("markets"))
}

pub(crate) fn set_market_collateral_factor(
    engine: &dyn SinglePoolComptroller,
    market: Address,
    collateral_factor: U256,
    liquidation_threshold: U256,
) -> Result<(), SentinelError> {
    engine
        .set_collateral_factor(market, collateral_factor, liquidation_threshold)
        .map_err(engine_error("set_collateral_factor"))
}

fn engine_error(operation: &'static str) -> impl Fn(EngineError) -> SentinelError {
    move |source| SentinelError::RiskEngine { operation, source }
}

/// Known comptrollers, keyed by identity.
///
/// A market whose comptroller equals the multi-pool address is handled
/// per pool; any other registered comptroller is single-pool.
pub struct RiskEngineRegistry {
    multi_pool_address: Address,
    multi_pool: Arc<dyn MultiPoolComptroller>,
    single_pool: HashMap<Address, Arc<dyn SinglePoolComptroller>>,
}

impl RiskEngineRegistry {
    pub fn new(multi_pool_address: Address, multi_pool: Arc<dyn MultiPoolComptroller>) -> Self {
        Self {
            multi_pool_address,
            multi_pool,
            single_pool: HashMap::new(),
        }
    }

    /// Register a single-pool comptroller under its identity.
    pub fn register_single_pool(
        &mut self,
        address: Address,
        comptroller: Arc<dyn SinglePoolComptroller>,
    ) {
        self.single_pool.insert(address, comptroller);
    }

    /// Resolve `comptroller` to its shape.
    pub fn resolve(&self, comptroller: Address) -> Result<RiskEngine, SentinelError> {
        if comptroller == self.multi_pool_address {
            return Ok(RiskEngine::MultiPool(Arc::clone(&self.multi_pool)));
        }
        self.single_pool
            .get(&comptroller)
            .map(|c| RiskEngine::SinglePool(Arc::clone(c)))
            .ok_or(SentinelError::UnknownRiskEngine { comptroller })
    }
}
