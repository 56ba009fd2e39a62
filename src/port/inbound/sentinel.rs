//! Result types returned by the sentinel to its callers.

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{DeviationReport, MarketState, PoolId};

/// A comptroller mutation performed by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MarketAction {
    BorrowPaused,
    BorrowUnpaused,
    SupplyPaused,
    SupplyUnpaused,
    /// `pool` is `None` for single-pool comptrollers.
    CollateralFactorZeroed { pool: Option<PoolId> },
    CollateralFactorRestored { pool: Option<PoolId> },
}

/// What a call to `handle_deviation` did.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionOutcome {
    pub market: Address,
    pub report: DeviationReport,
    /// Mutations in the order they were applied; empty for a no-op.
    pub actions: Vec<MarketAction>,
    /// State committed by the transition.
    pub state: MarketState,
    pub evaluated_at: DateTime<Utc>,
}

impl TransitionOutcome {
    /// True if the call changed nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Restriction-check view of one market.
///
/// Combines the flags the sentinel owns with the comptroller's live pause
/// status, which may also be set by governance.
#[derive(Debug, Clone, Serialize)]
pub struct MarketStatus {
    pub market: Address,
    pub state: MarketState,
    pub borrow_paused_on_comptroller: bool,
    pub supply_paused_on_comptroller: bool,
}
