//! A sentinel wired to in-memory adapters.
//!
//! The fixture registers two markets on the same underlying token:
//! [`MARKET`] on the multi-pool comptroller and [`SINGLE_MARKET`] on a
//! single-pool comptroller. Both feeds start at the same price, [`KEEPER`]
//! is trusted and [`ADMIN`] holds every permission.

use std::sync::Arc;

use alloy_primitives::{Address, U256};

use super::domain::{
    params, wad, ADMIN, KEEPER, MARKET, MULTI_POOL, SINGLE_MARKET, SINGLE_POOL, TOKEN,
};
use super::notifier::RecordingNotifier;
use crate::adapter::outbound::memory::{
    MemoryMultiPoolComptroller, MemorySinglePoolComptroller, RoleAccessControl,
    StaticMarketDirectory, StaticPriceFeed,
};
use crate::application::sentinel::{Collaborators, DeviationSentinel, RiskEngineRegistry};
use crate::application::state::SentinelState;
use crate::domain::{PoolId, RiskParameters, TokenMonitorConfig};
use crate::error::SentinelError;
use crate::port::inbound::sentinel::TransitionOutcome;
use crate::port::outbound::notifier::NotifierRegistry;

/// Threshold configured for [`TOKEN`].
pub const THRESHOLD: u8 = 10;

pub struct Fixture {
    pub sentinel: Arc<DeviationSentinel>,
    pub state: Arc<SentinelState>,
    pub primary: Arc<StaticPriceFeed>,
    pub secondary: Arc<StaticPriceFeed>,
    pub multi_pool: Arc<MemoryMultiPoolComptroller>,
    pub single_pool: Arc<MemorySinglePoolComptroller>,
    pub directory: Arc<StaticMarketDirectory>,
    pub access: Arc<RoleAccessControl>,
    pub events: RecordingNotifier,
}

impl Fixture {
    /// Multi-pool comptroller with the single pool 0; [`MARKET`] listed there.
    pub fn new() -> Self {
        let fixture = Self::with_pools(0, 0);
        fixture.multi_pool.list(PoolId::new(0), MARKET, Self::default_params());
        fixture
    }

    /// Multi-pool comptroller with pools `first..=last` and no listings.
    ///
    /// [`SINGLE_MARKET`] is always listed on the single-pool comptroller.
    pub fn with_pools(first: u64, last: u64) -> Self {
        let multi_pool = Arc::new(MemoryMultiPoolComptroller::new(
            PoolId::new(first),
            PoolId::new(last),
        ));
        let single_pool = Arc::new(MemorySinglePoolComptroller::new());
        single_pool.list(SINGLE_MARKET, Self::default_params());

        let mut engines = RiskEngineRegistry::new(MULTI_POOL, multi_pool.clone());
        engines.register_single_pool(SINGLE_POOL, single_pool.clone());

        let directory = Arc::new(StaticMarketDirectory::new());
        directory.register(MARKET, TOKEN, MULTI_POOL);
        directory.register(SINGLE_MARKET, TOKEN, SINGLE_POOL);

        let primary = Arc::new(StaticPriceFeed::new("primary"));
        let secondary = Arc::new(StaticPriceFeed::new("secondary"));
        primary.set_price(TOKEN, wad(1_000));
        secondary.set_price(TOKEN, wad(1_000));

        let access = Arc::new(RoleAccessControl::new());
        access.grant_all(ADMIN);

        let state = Arc::new(SentinelState::new());
        state.set_keeper(KEEPER, true);
        let config = TokenMonitorConfig::try_new(THRESHOLD, true)
            .expect("fixture threshold is valid");
        state.set_token_config(TOKEN, config);

        let events = RecordingNotifier::new();
        let mut notifier = NotifierRegistry::new();
        notifier.register(Box::new(events.clone()));

        let sentinel = Arc::new(DeviationSentinel::new(
            Arc::clone(&state),
            Collaborators {
                primary: primary.clone(),
                secondary: secondary.clone(),
                engines,
                markets: directory.clone(),
                access: access.clone(),
                notifier,
            },
        ));

        Self {
            sentinel,
            state,
            primary,
            secondary,
            multi_pool,
            single_pool,
            directory,
            access,
            events,
        }
    }

    /// 80% collateral factor, 85% liquidation threshold.
    pub fn default_params() -> RiskParameters {
        params(80, 85)
    }

    /// Set both feed prices for [`TOKEN`], in whole units.
    pub fn set_prices(&self, primary: u64, secondary: u64) {
        self.set_raw_prices(wad(primary), wad(secondary));
    }

    pub fn set_raw_prices(&self, primary: U256, secondary: U256) {
        self.primary.set_price(TOKEN, primary);
        self.secondary.set_price(TOKEN, secondary);
    }

    /// Secondary 50% above primary.
    pub fn skew_high(&self) {
        self.set_prices(1_000, 1_500);
    }

    /// Secondary 50% below primary.
    pub fn skew_low(&self) {
        self.set_prices(1_000, 500);
    }

    /// Both feeds agree.
    pub fn realign(&self) {
        self.set_prices(1_000, 1_000);
    }

    /// `handle_deviation` as the trusted keeper.
    pub fn handle(&self, market: Address) -> Result<TransitionOutcome, SentinelError> {
        self.sentinel.handle_deviation(KEEPER, market)
    }

    /// Total reads across both feeds.
    pub fn feed_reads(&self) -> usize {
        self.primary.reads() + self.secondary.reads()
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
