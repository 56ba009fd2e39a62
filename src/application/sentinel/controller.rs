//! The deviation sentinel: evaluation plus market state transitions.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use chrono::Utc;
use tracing::{debug, info, warn};

use super::engines::RiskEngineRegistry;
use super::transition::Transition;
use crate::application::state::SentinelState;
use crate::domain::{Action, DeviationReport, Skew, TokenMonitorConfig};
use crate::error::SentinelError;
use crate::port::inbound::sentinel::{MarketStatus, TransitionOutcome};
use crate::port::outbound::access::AccessControl;
use crate::port::outbound::market::MarketDirectory;
use crate::port::outbound::notifier::{DeviationEvent, Event, NotifierRegistry};
use crate::port::outbound::price_feed::PriceFeed;

/// External collaborators of the sentinel.
pub struct Collaborators {
    /// Resilient multi-source feed.
    pub primary: Arc<dyn PriceFeed>,
    /// DEX-derived feed that may veto the primary.
    pub secondary: Arc<dyn PriceFeed>,
    pub engines: RiskEngineRegistry,
    pub markets: Arc<dyn MarketDirectory>,
    pub access: Arc<dyn AccessControl>,
    pub notifier: NotifierRegistry,
}

/// Restricts markets whose two price feeds disagree and lifts the
/// restriction once they realign.
///
/// `handle_deviation` is safe to call any number of times from any number
/// of keepers: per-market flags decide which comptroller calls are still
/// owed, and each market's transition runs under its own lock.
pub struct DeviationSentinel {
    pub(super) state: Arc<SentinelState>,
    primary: Arc<dyn PriceFeed>,
    secondary: Arc<dyn PriceFeed>,
    engines: RiskEngineRegistry,
    markets: Arc<dyn MarketDirectory>,
    pub(super) access: Arc<dyn AccessControl>,
    pub(super) notifier: NotifierRegistry,
}

impl DeviationSentinel {
    #[must_use]
    pub fn new(state: Arc<SentinelState>, collaborators: Collaborators) -> Self {
        Self {
            state,
            primary: collaborators.primary,
            secondary: collaborators.secondary,
            engines: collaborators.engines,
            markets: collaborators.markets,
            access: collaborators.access,
            notifier: collaborators.notifier,
        }
    }

    /// Shared state backing this sentinel.
    #[must_use]
    pub fn state(&self) -> &Arc<SentinelState> {
        &self.state
    }

    /// Compare both feeds for `market`'s underlying token.
    ///
    /// Read-only and open to any caller; available even when enforcement is
    /// disabled for the token.
    pub fn check_price_deviation(&self, market: Address) -> Result<DeviationReport, SentinelError> {
        let token = self.underlying(market)?;
        let config = self.configured(token)?;
        self.evaluate(token, config.deviation_percent())
    }

    /// Apply or lift restrictions on `market` according to the current prices.
    ///
    /// Only trusted keepers may call this. On error nothing is committed:
    /// comptroller mutations already made are compensated and no event is
    /// published.
    pub fn handle_deviation(
        &self,
        caller: Address,
        market: Address,
    ) -> Result<TransitionOutcome, SentinelError> {
        if !self.state.is_trusted_keeper(caller) {
            warn!(%caller, %market, "Rejected untrusted keeper");
            return Err(SentinelError::UntrustedKeeper { caller });
        }

        let token = self.underlying(market)?;
        let config = self.configured(token)?;
        if !config.enabled() {
            return Err(SentinelError::MonitoringDisabled { token });
        }
        let engine = self.resolve_engine(market)?;

        let slot = self.state.market_slot(market);
        let mut current = slot.lock();

        let report = self.evaluate(token, config.deviation_percent())?;
        let mut transition = Transition::new(market, &engine, &current);

        let result = if report.has_deviation() {
            Self::restrict(&mut transition, report.skew())
        } else {
            Self::recover(&mut transition)
        };
        if let Err(e) = result {
            transition.rollback(&e);
            return Err(e);
        }

        let mut committed = transition.commit();
        *current = committed.state.clone();
        drop(current);

        if report.has_deviation() && !committed.actions.is_empty() {
            committed.events.insert(
                0,
                Event::DeviationDetected(DeviationEvent {
                    market,
                    primary: report.primary(),
                    secondary: report.secondary(),
                    deviation_percent: report.deviation_percent(),
                    skew: report.skew(),
                }),
            );
        }

        if committed.actions.is_empty() {
            debug!(
                %market,
                deviation = %report.deviation_percent(),
                has_deviation = report.has_deviation(),
                "No transition required"
            );
        } else {
            info!(
                %market,
                primary = %report.primary(),
                secondary = %report.secondary(),
                deviation = %report.deviation_percent(),
                actions = committed.actions.len(),
                "Market transition committed"
            );
        }

        for event in committed.events {
            self.notifier.notify_all(event);
        }

        Ok(TransitionOutcome {
            market,
            report,
            actions: committed.actions,
            state: committed.state,
            evaluated_at: Utc::now(),
        })
    }

    /// Restriction-check surface: stored flags plus live comptroller pauses.
    pub fn market_status(&self, market: Address) -> Result<MarketStatus, SentinelError> {
        let engine = self.resolve_engine(market)?;
        Ok(MarketStatus {
            market,
            state: self.state.market_state(market),
            borrow_paused_on_comptroller: engine.action_paused(market, Action::Borrow)?,
            supply_paused_on_comptroller: engine.action_paused(market, Action::SUPPLY)?,
        })
    }

    fn restrict(transition: &mut Transition<'_>, skew: Skew) -> Result<(), SentinelError> {
        match skew {
            // Inflated secondary price: stop new borrowing.
            Skew::High => transition.pause_borrow(),
            // Deflated secondary price: drop collateral weight and stop supply.
            Skew::Low => {
                transition.zero_collateral_factor()?;
                transition.pause_supply()
            }
        }
    }

    fn recover(transition: &mut Transition<'_>) -> Result<(), SentinelError> {
        transition.unpause_borrow()?;
        transition.restore_collateral_factor()?;
        transition.unpause_supply()
    }

    fn evaluate(&self, token: Address, threshold: u8) -> Result<DeviationReport, SentinelError> {
        let primary = Self::read_price(self.primary.as_ref(), token)?;
        let secondary = Self::read_price(self.secondary.as_ref(), token)?;
        Ok(DeviationReport::evaluate(primary, secondary, threshold))
    }

    fn read_price(feed: &dyn PriceFeed, token: Address) -> Result<U256, SentinelError> {
        feed.price(token)
            .map_err(|source| SentinelError::PriceUnavailable {
                feed: feed.name().to_string(),
                token,
                source,
            })
    }

    fn underlying(&self, market: Address) -> Result<Address, SentinelError> {
        self.markets
            .underlying(market)
            .map_err(|source| SentinelError::MarketLookup { market, source })
    }

    fn configured(&self, token: Address) -> Result<TokenMonitorConfig, SentinelError> {
        self.state
            .token_config(token)
            .ok_or(SentinelError::NotConfigured { token })
    }

    fn resolve_engine(
        &self,
        market: Address,
    ) -> Result<super::engines::RiskEngine, SentinelError> {
        let comptroller = self
            .markets
            .comptroller(market)
            .map_err(|source| SentinelError::MarketLookup { market, source })?;
        self.engines.resolve(comptroller)
    }
}
