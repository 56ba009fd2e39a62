//! Collateral factor snapshot and restore for both comptroller shapes.

use tracing::{debug, info, warn};

use super::engines::{self, RiskEngine};
use super::transition::{Transition, Undo};
use crate::error::SentinelError;
use crate::port::inbound::sentinel::MarketAction;
use crate::port::outbound::comptroller::{MultiPoolComptroller, SinglePoolComptroller};
use crate::port::outbound::notifier::Event;

impl Transition<'_> {
    /// Snapshot current parameters and set the collateral factor to zero,
    /// keeping the liquidation threshold. No-op while a snapshot is held.
    pub(crate) fn zero_collateral_factor(&mut self) -> Result<(), SentinelError> {
        if self.draft.cf_modified() {
            debug!(market = %self.market, "Collateral factor already zeroed");
            return Ok(());
        }
        let engine = self.engine;
        match engine {
            RiskEngine::MultiPool(c) => self.zero_in_pools(c.as_ref()),
            RiskEngine::SinglePool(c) => self.zero_in_market(c.as_ref()),
        }
    }

    /// Write snapshots back and drop them. No-op if nothing was zeroed.
    pub(crate) fn restore_collateral_factor(&mut self) -> Result<(), SentinelError> {
        if !self.draft.cf_modified() {
            return Ok(());
        }
        let engine = self.engine;
        match engine {
            RiskEngine::MultiPool(c) => self.restore_in_pools(c.as_ref()),
            RiskEngine::SinglePool(c) => self.restore_in_market(c.as_ref()),
        }
    }

    fn zero_in_pools(&mut self, engine: &dyn MultiPoolComptroller) -> Result<(), SentinelError> {
        // Flag first so no later step in this call snapshots again.
        self.draft.set_cf_modified(true);

        let range = engines::pool_range(engine)?;
        for pool in range.iter() {
            let listing = engines::pool_market(engine, pool, self.market)?;
            if !listing.is_listed {
                continue;
            }
            let previous = listing.params();
            self.draft.record_pool_snapshot(pool, previous);

            let zeroed = previous.zeroed();
            engines::set_pool_collateral_factor(
                engine,
                pool,
                self.market,
                zeroed.collateral_factor,
                zeroed.liquidation_threshold,
            )?;
            self.journal.push(Undo::PoolCollateral {
                pool,
                params: previous,
            });

            info!(
                market = %self.market,
                pool = pool.get(),
                previous_cf = %previous.collateral_factor,
                "Zeroed collateral factor in pool"
            );
            self.record(
                Event::CollateralFactorZeroed {
                    market: self.market,
                    pool: Some(pool),
                    previous,
                },
                MarketAction::CollateralFactorZeroed { pool: Some(pool) },
            );
        }

        // The flag only stands for held snapshots.
        if self.draft.pool_snapshots().next().is_none() {
            debug!(market = %self.market, "Market not listed in any pool");
            self.draft.set_cf_modified(false);
        }
        Ok(())
    }

    fn restore_in_pools(&mut self, engine: &dyn MultiPoolComptroller) -> Result<(), SentinelError> {
        let range = engines::pool_range(engine)?;
        for pool in range.iter() {
            let listing = engines::pool_market(engine, pool, self.market)?;
            if !listing.is_listed {
                continue;
            }
            // Pools added or listed after the snapshot were never zeroed.
            let Some(snapshot) = self.draft.pool_snapshot(pool) else {
                continue;
            };

            engines::set_pool_collateral_factor(
                engine,
                pool,
                self.market,
                snapshot.collateral_factor,
                snapshot.liquidation_threshold,
            )?;
            self.journal.push(Undo::PoolCollateral {
                pool,
                params: listing.params(),
            });
            self.draft.remove_pool_snapshot(pool);

            info!(
                market = %self.market,
                pool = pool.get(),
                restored_cf = %snapshot.collateral_factor,
                "Restored collateral factor in pool"
            );
            self.record(
                Event::CollateralFactorRestored {
                    market: self.market,
                    pool: Some(pool),
                    restored: snapshot,
                },
                MarketAction::CollateralFactorRestored { pool: Some(pool) },
            );
        }

        for (pool, snapshot) in self.draft.drain_pool_snapshots() {
            warn!(
                market = %self.market,
                pool = pool.get(),
                cf = %snapshot.collateral_factor,
                "Discarding snapshot for pool no longer listing the market"
            );
        }
        self.draft.set_cf_modified(false);
        Ok(())
    }

    fn zero_in_market(&mut self, engine: &dyn SinglePoolComptroller) -> Result<(), SentinelError> {
        let previous = engines::market_listing(engine, self.market)?.params();
        self.draft.record_original(previous);
        self.draft.set_cf_modified(true);

        let zeroed = previous.zeroed();
        engines::set_market_collateral_factor(
            engine,
            self.market,
            zeroed.collateral_factor,
            zeroed.liquidation_threshold,
        )?;
        self.journal.push(Undo::MarketCollateral { params: previous });

        info!(
            market = %self.market,
            previous_cf = %previous.collateral_factor,
            "Zeroed collateral factor"
        );
        self.record(
            Event::CollateralFactorZeroed {
                market: self.market,
                pool: None,
                previous,
            },
            MarketAction::CollateralFactorZeroed { pool: None },
        );
        Ok(())
    }

    fn restore_in_market(&mut self, engine: &dyn SinglePoolComptroller) -> Result<(), SentinelError> {
        let current = engines::market_listing(engine, self.market)?.params();
        let snapshot = self.draft.original();

        engines::set_market_collateral_factor(
            engine,
            self.market,
            snapshot.collateral_factor,
            snapshot.liquidation_threshold,
        )?;
        self.journal.push(Undo::MarketCollateral { params: current });
        self.draft.clear_original();
        self.draft.set_cf_modified(false);

        info!(
            market = %self.market,
            restored_cf = %snapshot.collateral_factor,
            "Restored collateral factor"
        );
        self.record(
            Event::CollateralFactorRestored {
                market: self.market,
                pool: None,
                restored: snapshot,
            },
            MarketAction::CollateralFactorRestored { pool: None },
        );
        Ok(())
    }
}
