//! Per-market restriction state held by the sentinel.
//!
//! The three flags record which restrictions the sentinel itself owns on a
//! market; they are the only source of truth for which comptroller calls are
//! still owed on recovery. Snapshots hold the risk parameters to write back
//! once prices realign.

use std::collections::BTreeMap;

use alloy_primitives::U256;
use serde::Serialize;

use super::id::PoolId;

/// Collateral factor and liquidation threshold pair (1e18 mantissas).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskParameters {
    pub collateral_factor: U256,
    pub liquidation_threshold: U256,
}

impl RiskParameters {
    #[must_use]
    pub const fn new(collateral_factor: U256, liquidation_threshold: U256) -> Self {
        Self {
            collateral_factor,
            liquidation_threshold,
        }
    }

    /// Same liquidation threshold with the collateral factor set to zero.
    #[must_use]
    pub const fn zeroed(&self) -> Self {
        Self {
            collateral_factor: U256::ZERO,
            liquidation_threshold: self.liquidation_threshold,
        }
    }
}

/// Restriction state of one market.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MarketState {
    borrow_paused: bool,
    supply_paused: bool,
    cf_modified: bool,
    original: RiskParameters,
    pool_snapshots: BTreeMap<PoolId, RiskParameters>,
}

impl MarketState {
    #[must_use]
    pub const fn borrow_paused(&self) -> bool {
        self.borrow_paused
    }

    #[must_use]
    pub const fn supply_paused(&self) -> bool {
        self.supply_paused
    }

    #[must_use]
    pub const fn cf_modified(&self) -> bool {
        self.cf_modified
    }

    /// Snapshot taken from a single-pool comptroller.
    #[must_use]
    pub const fn original(&self) -> RiskParameters {
        self.original
    }

    /// Snapshot taken from one pool of a multi-pool comptroller.
    #[must_use]
    pub fn pool_snapshot(&self, pool: PoolId) -> Option<RiskParameters> {
        self.pool_snapshots.get(&pool).copied()
    }

    /// Every pool snapshot currently held, ordered by pool id.
    pub fn pool_snapshots(&self) -> impl Iterator<Item = (PoolId, RiskParameters)> + '_ {
        self.pool_snapshots.iter().map(|(pool, params)| (*pool, *params))
    }

    /// True if any restriction is currently owned by the sentinel.
    #[must_use]
    pub const fn is_restricted(&self) -> bool {
        self.borrow_paused || self.supply_paused || self.cf_modified
    }

    pub(crate) fn set_borrow_paused(&mut self, paused: bool) {
        self.borrow_paused = paused;
    }

    pub(crate) fn set_supply_paused(&mut self, paused: bool) {
        self.supply_paused = paused;
    }

    pub(crate) fn set_cf_modified(&mut self, modified: bool) {
        self.cf_modified = modified;
    }

    pub(crate) fn record_original(&mut self, params: RiskParameters) {
        self.original = params;
    }

    pub(crate) fn clear_original(&mut self) {
        self.original = RiskParameters::default();
    }

    pub(crate) fn record_pool_snapshot(&mut self, pool: PoolId, params: RiskParameters) {
        self.pool_snapshots.insert(pool, params);
    }

    pub(crate) fn remove_pool_snapshot(&mut self, pool: PoolId) -> Option<RiskParameters> {
        self.pool_snapshots.remove(&pool)
    }

    /// Drop every remaining pool snapshot, returning what was dropped.
    pub(crate) fn drain_pool_snapshots(&mut self) -> Vec<(PoolId, RiskParameters)> {
        std::mem::take(&mut self.pool_snapshots).into_iter().collect()
    }
}
