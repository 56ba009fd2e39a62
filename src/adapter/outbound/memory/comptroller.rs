//! In-memory comptrollers of both shapes.
//!
//! Used by the paper environment and by tests. Every mutating call is
//! recorded so callers can assert exactly which comptroller calls happened,
//! and failures can be injected per action or per pool.

use std::collections::{HashMap, HashSet};

use alloy_primitives::{Address, U256};
use parking_lot::Mutex;

use crate::domain::{Action, PoolId, RiskParameters};
use crate::port::outbound::comptroller::{
    Comptroller, EngineError, MarketListing, MultiPoolComptroller, PoolMarket,
    SinglePoolComptroller, NO_ERROR,
};

/// Result code for a market that is not listed in the target pool.
pub const MARKET_NOT_LISTED: u64 = 9;

/// A mutating call received by an in-memory comptroller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCall {
    SetActionPaused {
        market: Address,
        action: Action,
        paused: bool,
    },
    SetCollateralFactor {
        pool: Option<PoolId>,
        market: Address,
        collateral_factor: U256,
        liquidation_threshold: U256,
    },
}

/// Pause flags, failure injection and the call log shared by both shapes.
#[derive(Default)]
struct PauseBook {
    paused: HashSet<(Address, Action)>,
    failing_action: Option<Action>,
    calls: Vec<EngineCall>,
}

impl PauseBook {
    fn set(&mut self, markets: &[Address], actions: &[Action], paused: bool) -> Result<(), EngineError> {
        for &market in markets {
            for &action in actions {
                self.calls.push(EngineCall::SetActionPaused {
                    market,
                    action,
                    paused,
                });
                if self.failing_action == Some(action) {
                    return Err(EngineError::Reverted(format!("cannot toggle {action}")));
                }
            }
        }
        for &market in markets {
            for &action in actions {
                if paused {
                    self.paused.insert((market, action));
                } else {
                    self.paused.remove(&(market, action));
                }
            }
        }
        Ok(())
    }

    fn is_paused(&self, market: Address, action: Action) -> bool {
        self.paused.contains(&(market, action))
    }
}

#[derive(Default)]
struct MultiPoolBook {
    first: u64,
    last: u64,
    listings: HashMap<(PoolId, Address), RiskParameters>,
    rejections: HashMap<PoolId, u64>,
    pauses: PauseBook,
}

/// Multi-pool comptroller keeping parameters per `(pool, market)`.
pub struct MemoryMultiPoolComptroller {
    book: Mutex<MultiPoolBook>,
}

impl MemoryMultiPoolComptroller {
    /// Create a comptroller whose valid pools are `first..=last`.
    #[must_use]
    pub fn new(first: PoolId, last: PoolId) -> Self {
        Self {
            book: Mutex::new(MultiPoolBook {
                first: first.get(),
                last: last.get(),
                ..MultiPoolBook::default()
            }),
        }
    }

    /// Append a new pool and return its id.
    pub fn add_pool(&self) -> PoolId {
        let mut book = self.book.lock();
        book.last += 1;
        PoolId::new(book.last)
    }

    pub fn list(&self, pool: PoolId, market: Address, params: RiskParameters) {
        self.book.lock().listings.insert((pool, market), params);
    }

    pub fn delist(&self, pool: PoolId, market: Address) {
        self.book.lock().listings.remove(&(pool, market));
    }

    /// Make collateral factor updates in `pool` return `code`.
    pub fn reject_pool(&self, pool: PoolId, code: u64) {
        self.book.lock().rejections.insert(pool, code);
    }

    /// Make toggling `action` fail; `None` clears the failure.
    pub fn fail_action(&self, action: Option<Action>) {
        self.book.lock().pauses.failing_action = action;
    }

    #[must_use]
    pub fn params(&self, pool: PoolId, market: Address) -> Option<RiskParameters> {
        self.book.lock().listings.get(&(pool, market)).copied()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<EngineCall> {
        self.book.lock().pauses.calls.clone()
    }

    pub fn clear_calls(&self) {
        self.book.lock().pauses.calls.clear();
    }
}

impl Comptroller for MemoryMultiPoolComptroller {
    fn set_actions_paused(
        &self,
        markets: &[Address],
        actions: &[Action],
        paused: bool,
    ) -> Result<(), EngineError> {
        self.book.lock().pauses.set(markets, actions, paused)
    }

    fn action_paused(&self, market: Address, action: Action) -> Result<bool, EngineError> {
        Ok(self.book.lock().pauses.is_paused(market, action))
    }
}

impl MultiPoolComptroller for MemoryMultiPoolComptroller {
    fn first_pool_id(&self) -> Result<PoolId, EngineError> {
        Ok(PoolId::new(self.book.lock().first))
    }

    fn last_pool_id(&self) -> Result<PoolId, EngineError> {
        Ok(PoolId::new(self.book.lock().last))
    }

    fn pool_market(&self, pool: PoolId, market: Address) -> Result<PoolMarket, EngineError> {
        let book = self.book.lock();
        Ok(book
            .listings
            .get(&(pool, market))
            .map(|params| PoolMarket {
                is_listed: true,
                collateral_factor: params.collateral_factor,
                liquidation_threshold: params.liquidation_threshold,
            })
            .unwrap_or_default())
    }

    fn set_collateral_factor(
        &self,
        pool: PoolId,
        market: Address,
        collateral_factor: U256,
        liquidation_threshold: U256,
    ) -> Result<u64, EngineError> {
        let mut book = self.book.lock();
        book.pauses.calls.push(EngineCall::SetCollateralFactor {
            pool: Some(pool),
            market,
            collateral_factor,
            liquidation_threshold,
        });

        if let Some(&code) = book.rejections.get(&pool) {
            return Ok(code);
        }
        match book.listings.get_mut(&(pool, market)) {
            Some(params) => {
                *params = RiskParameters::new(collateral_factor, liquidation_threshold);
                Ok(NO_ERROR)
            }
            None => Ok(MARKET_NOT_LISTED),
        }
    }
}

#[derive(Default)]
struct SinglePoolBook {
    listings: HashMap<Address, RiskParameters>,
    failing_updates: Option<String>,
    pauses: PauseBook,
}

/// Single-pool comptroller keeping one parameter pair per market.
#[derive(Default)]
pub struct MemorySinglePoolComptroller {
    book: Mutex<SinglePoolBook>,
}

impl MemorySinglePoolComptroller {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self, market: Address, params: RiskParameters) {
        self.book.lock().listings.insert(market, params);
    }

    /// Make collateral factor updates revert with `reason`; `None` clears it.
    pub fn fail_collateral_updates(&self, reason: Option<String>) {
        self.book.lock().failing_updates = reason;
    }

    /// Make toggling `action` fail; `None` clears the failure.
    pub fn fail_action(&self, action: Option<Action>) {
        self.book.lock().pauses.failing_action = action;
    }

    #[must_use]
    pub fn params(&self, market: Address) -> Option<RiskParameters> {
        self.book.lock().listings.get(&market).copied()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<EngineCall> {
        self.book.lock().pauses.calls.clone()
    }

    pub fn clear_calls(&self) {
        self.book.lock().pauses.calls.clear();
    }
}

impl Comptroller for MemorySinglePoolComptroller {
    fn set_actions_paused(
        &self,
        markets: &[Address],
        actions: &[Action],
        paused: bool,
    ) -> Result<(), EngineError> {
        self.book.lock().pauses.set(markets, actions, paused)
    }

    fn action_paused(&self, market: Address, action: Action) -> Result<bool, EngineError> {
        Ok(self.book.lock().pauses.is_paused(market, action))
    }
}

impl SinglePoolComptroller for MemorySinglePoolComptroller {
    fn market(&self, market: Address) -> Result<MarketListing, EngineError> {
        let book = self.book.lock();
        Ok(book
            .listings
            .get(&market)
            .map(|params| MarketListing {
                is_listed: true,
                collateral_factor: params.collateral_factor,
                liquidation_threshold: params.liquidation_threshold,
            })
            .unwrap_or_default())
    }

    fn set_collateral_factor(
        &self,
        market: Address,
        collateral_factor: U256,
        liquidation_threshold: U256,
    ) -> Result<(), EngineError> {
        let mut book = self.book.lock();
        book.pauses.calls.push(EngineCall::SetCollateralFactor {
            pool: None,
            market,
            collateral_factor,
            liquidation_threshold,
        });

        if let Some(reason) = book.failing_updates.clone() {
            return Err(EngineError::Reverted(reason));
        }
        let params = book
            .listings
            .get_mut(&market)
            .ok_or_else(|| EngineError::Reverted(format!("market {market} not listed")))?;
        *params = RiskParameters::new(collateral_factor, liquidation_threshold);
        Ok(())
    }
}
