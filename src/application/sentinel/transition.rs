//! One all-or-nothing state transition of a market.
//!
//! A transition mutates a draft copy of the market state and records an undo
//! entry for every comptroller mutation that succeeded. If any step fails the
//! undo journal is replayed in reverse and the draft is dropped, so neither
//! flags, snapshots nor events from a failed call are ever committed.

use alloy_primitives::Address;
use tracing::{debug, error, warn};

use super::engines::{self, RiskEngine};
use crate::domain::{Action, MarketState, PoolId, RiskParameters};
use crate::error::SentinelError;
use crate::port::inbound::sentinel::MarketAction;
use crate::port::outbound::notifier::Event;

/// Compensating action for an applied comptroller mutation.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Undo {
    /// Set `action` back to `paused`.
    Pause { action: Action, paused: bool },
    /// Write `params` back into `pool` of the multi-pool comptroller.
    PoolCollateral { pool: PoolId, params: RiskParameters },
    /// Write `params` back into the single-pool comptroller.
    MarketCollateral { params: RiskParameters },
}

pub(crate) struct Transition<'a> {
    pub(crate) market: Address,
    pub(crate) engine: &'a RiskEngine,
    pub(crate) draft: MarketState,
    pub(crate) journal: Vec<Undo>,
    pub(crate) events: Vec<Event>,
    pub(crate) actions: Vec<MarketAction>,
}

/// Everything a successful transition produced.
pub(crate) struct Committed {
    pub(crate) state: MarketState,
    pub(crate) events: Vec<Event>,
    pub(crate) actions: Vec<MarketAction>,
}

impl<'a> Transition<'a> {
    pub(crate) fn new(market: Address, engine: &'a RiskEngine, current: &MarketState) -> Self {
        Self {
            market,
            engine,
            draft: current.clone(),
            journal: Vec::new(),
            events: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub(crate) fn pause_borrow(&mut self) -> Result<(), SentinelError> {
        if self.draft.borrow_paused() {
            debug!(market = %self.market, "Borrow already paused");
            return Ok(());
        }
        self.toggle(Action::Borrow, true)?;
        self.draft.set_borrow_paused(true);
        self.record(
            Event::BorrowPaused {
                market: self.market,
            },
            MarketAction::BorrowPaused,
        );
        Ok(())
    }

    pub(crate) fn unpause_borrow(&mut self) -> Result<(), SentinelError> {
        if !self.draft.borrow_paused() {
            return Ok(());
        }
        self.toggle(Action::Borrow, false)?;
        self.draft.set_borrow_paused(false);
        self.record(
            Event::BorrowUnpaused {
                market: self.market,
            },
            MarketAction::BorrowUnpaused,
        );
        Ok(())
    }

    pub(crate) fn pause_supply(&mut self) -> Result<(), SentinelError> {
        if self.draft.supply_paused() {
            debug!(market = %self.market, "Supply already paused");
            return Ok(());
        }
        self.toggle(Action::SUPPLY, true)?;
        self.draft.set_supply_paused(true);
        self.record(
            Event::SupplyPaused {
                market: self.market,
            },
            MarketAction::SupplyPaused,
        );
        Ok(())
    }

    pub(crate) fn unpause_supply(&mut self) -> Result<(), SentinelError> {
        if !self.draft.supply_paused() {
            return Ok(());
        }
        self.toggle(Action::SUPPLY, false)?;
        self.draft.set_supply_paused(false);
        self.record(
            Event::SupplyUnpaused {
                market: self.market,
            },
            MarketAction::SupplyUnpaused,
        );
        Ok(())
    }

    pub(crate) fn record(&mut self, event: Event, action: MarketAction) {
        self.events.push(event);
        self.actions.push(action);
    }

    fn toggle(&mut self, action: Action, paused: bool) -> Result<(), SentinelError> {
        self.engine.set_action_paused(self.market, action, paused)?;
        self.journal.push(Undo::Pause {
            action,
            paused: !paused,
        });
        Ok(())
    }

    pub(crate) fn commit(self) -> Committed {
        Committed {
            state: self.draft,
            events: self.events,
            actions: self.actions,
        }
    }

    /// Undo every applied mutation, newest first.
    ///
    /// A failing compensation is logged and the remaining entries are still
    /// attempted.
    pub(crate) fn rollback(self, cause: &SentinelError) {
        if self.journal.is_empty() {
            return;
        }
        warn!(
            market = %self.market,
            steps = self.journal.len(),
            cause = %cause,
            "Rolling back partial transition"
        );

        for undo in self.journal.into_iter().rev() {
            let result = match (undo, self.engine) {
                (Undo::Pause { action, paused }, engine) => {
                    engine.set_action_paused(self.market, action, paused)
                }
                (Undo::PoolCollateral { pool, params }, RiskEngine::MultiPool(c)) => {
                    engines::set_pool_collateral_factor(
                        c.as_ref(),
                        pool,
                        self.market,
                        params.collateral_factor,
                        params.liquidation_threshold,
                    )
                }
                (Undo::MarketCollateral { params }, RiskEngine::SinglePool(c)) => {
                    engines::set_market_collateral_factor(
                        c.as_ref(),
                        self.market,
                        params.collateral_factor,
                        params.liquidation_threshold,
                    )
                }
                // Collateral entries are only journaled against their own shape.
                (undo, _) => {
                    error!(
                        market = %self.market,
                        ?undo,
                        "Undo entry does not match comptroller shape"
                    );
                    continue;
                }
            };

            if let Err(e) = result {
                error!(
                    market = %self.market,
                    ?undo,
                    error = %e,
                    "Compensating action failed; comptroller may need manual repair"
                );
            }
        }
    }
}
