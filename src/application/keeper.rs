//! Periodic keeper loop.
//!
//! Calls `handle_deviation` for every watched market on a fixed interval.
//! A failure on one market is logged and never stops the loop.

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::application::sentinel::DeviationSentinel;
use crate::port::inbound::sentinel::TransitionOutcome;

/// Counters for one pass over the watched markets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub checked: usize,
    pub changed: usize,
    pub failed: usize,
}

/// Drives the sentinel on behalf of one keeper identity.
pub struct KeeperLoop {
    sentinel: Arc<DeviationSentinel>,
    keeper: Address,
    markets: Vec<Address>,
    period: Duration,
}

impl KeeperLoop {
    #[must_use]
    pub fn new(
        sentinel: Arc<DeviationSentinel>,
        keeper: Address,
        markets: Vec<Address>,
        period: Duration,
    ) -> Self {
        Self {
            sentinel,
            keeper,
            markets,
            period,
        }
    }

    /// Run until `shutdown` flips to `true` or its sender is dropped.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            keeper = %self.keeper,
            markets = self.markets.len(),
            period_secs = self.period.as_secs(),
            "Keeper loop started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let summary = self.tick().await;
                    info!(
                        checked = summary.checked,
                        changed = summary.changed,
                        failed = summary.failed,
                        "Keeper tick complete"
                    );
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!(keeper = %self.keeper, "Keeper loop stopped");
    }

    /// Handle every watched market once.
    pub async fn tick(&self) -> TickSummary {
        let mut summary = TickSummary::default();
        for &market in &self.markets {
            summary.checked += 1;
            match self.handle(market).await {
                Some(outcome) if !outcome.is_noop() => summary.changed += 1,
                Some(_) => {}
                None => summary.failed += 1,
            }
        }
        summary
    }

    async fn handle(&self, market: Address) -> Option<TransitionOutcome> {
        let sentinel = Arc::clone(&self.sentinel);
        let keeper = self.keeper;
        // Comptroller calls are blocking round-trips.
        let joined =
            tokio::task::spawn_blocking(move || sentinel.handle_deviation(keeper, market)).await;

        match joined {
            Ok(Ok(outcome)) => Some(outcome),
            Ok(Err(e)) => {
                warn!(%market, error = %e, "Deviation handling failed");
                None
            }
            Err(e) => {
                error!(%market, error = %e, "Deviation handling task panicked");
                None
            }
        }
    }
}
