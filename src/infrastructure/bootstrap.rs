//! Composition root for the paper environment.
//!
//! Builds the sentinel against in-memory adapters seeded from [`Config`].
//! The concrete adapter handles are returned alongside the sentinel so the
//! CLI can report on them.

use std::collections::HashMap;
use std::sync::Arc;

use alloy_primitives::Address;
use tracing::{debug, info};

use crate::adapter::outbound::memory::{
    MemoryMultiPoolComptroller, MemorySinglePoolComptroller, RoleAccessControl,
    StaticMarketDirectory, StaticPriceFeed,
};
use crate::application::sentinel::{Collaborators, DeviationSentinel, RiskEngineRegistry};
use crate::application::state::SentinelState;
use crate::domain::{PoolId, RiskParameters};
use crate::error::Result;
use crate::infrastructure::config::paper::{parse_u256, ComptrollerKind};
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::notifier::{LogNotifier, NotifierRegistry};

/// Name reported by the primary feed.
pub const PRIMARY_FEED: &str = "primary";
/// Name reported by the secondary feed.
pub const SECONDARY_FEED: &str = "secondary";

/// A wired sentinel plus handles to the in-memory adapters behind it.
pub struct PaperEnvironment {
    pub sentinel: Arc<DeviationSentinel>,
    pub state: Arc<SentinelState>,
    pub primary: Arc<StaticPriceFeed>,
    pub secondary: Arc<StaticPriceFeed>,
    pub multi_pool: Arc<MemoryMultiPoolComptroller>,
    pub single_pool: HashMap<Address, Arc<MemorySinglePoolComptroller>>,
    pub directory: Arc<StaticMarketDirectory>,
    pub access: Arc<RoleAccessControl>,
}

impl PaperEnvironment {
    /// Markets watched by the keeper loop.
    #[must_use]
    pub fn markets(&self) -> Vec<Address> {
        self.directory.markets()
    }
}

/// Build the notifier registry.
pub(crate) fn build_notifier_registry() -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier));
    registry
}

/// Wire a sentinel against in-memory adapters seeded from `config`.
///
/// # Errors
///
/// Returns an error if a seeded value fails to parse.
pub fn build_paper_environment(config: &Config) -> Result<PaperEnvironment> {
    let kinds = config.comptroller_kinds()?;
    let multi_pool_address = config.sentinel.multi_pool_comptroller;

    let (first, last) = config
        .paper
        .comptrollers
        .iter()
        .find(|c| c.address == multi_pool_address)
        .map_or((1, 0), |c| (c.first_pool_id, c.last_pool_id));
    let multi_pool = Arc::new(MemoryMultiPoolComptroller::new(
        PoolId::new(first),
        PoolId::new(last),
    ));

    let mut engines = RiskEngineRegistry::new(multi_pool_address, multi_pool.clone());
    let mut single_pool = HashMap::new();
    for (&address, &kind) in &kinds {
        if kind == ComptrollerKind::SinglePool {
            let comptroller = Arc::new(MemorySinglePoolComptroller::new());
            engines.register_single_pool(address, comptroller.clone());
            single_pool.insert(address, comptroller);
        }
    }

    for listing in &config.paper.listings {
        let params = RiskParameters::new(
            parse_u256("collateral_factor", &listing.collateral_factor)?,
            parse_u256("liquidation_threshold", &listing.liquidation_threshold)?,
        );
        match (listing.pool_id, single_pool.get(&listing.comptroller)) {
            (Some(pool), _) => multi_pool.list(PoolId::new(pool), listing.market, params),
            (None, Some(comptroller)) => comptroller.list(listing.market, params),
            (None, None) => {}
        }
    }

    let primary = Arc::new(StaticPriceFeed::new(PRIMARY_FEED));
    let secondary = Arc::new(StaticPriceFeed::new(SECONDARY_FEED));
    for price in &config.paper.prices {
        primary.set_price(price.token, parse_u256("primary", &price.primary)?);
        secondary.set_price(price.token, parse_u256("secondary", &price.secondary)?);
    }

    let directory = Arc::new(StaticMarketDirectory::new());
    for market in &config.markets {
        directory.register(market.address, market.underlying, market.comptroller);
    }

    let access = Arc::new(RoleAccessControl::new());
    for &admin in &config.sentinel.admins {
        access.grant_all(admin);
    }

    let state = Arc::new(SentinelState::new());
    for &keeper in &config.keepers {
        state.set_keeper(keeper, true);
    }
    if let Some(keeper) = config.sentinel.keeper {
        state.set_keeper(keeper, true);
    }
    for (token, token_config) in config.token_configs()? {
        state.set_token_config(token, token_config);
    }
    debug!(
        keepers = state.keeper_count(),
        tokens = config.tokens.len(),
        "Seeded sentinel state"
    );

    let sentinel = Arc::new(DeviationSentinel::new(
        Arc::clone(&state),
        Collaborators {
            primary: primary.clone(),
            secondary: secondary.clone(),
            engines,
            markets: directory.clone(),
            access: access.clone(),
            notifier: build_notifier_registry(),
        },
    ));

    info!(
        markets = config.markets.len(),
        single_pool = single_pool.len(),
        multi_pool = %multi_pool_address,
        "Paper environment ready"
    );

    Ok(PaperEnvironment {
        sentinel,
        state,
        primary,
        secondary,
        multi_pool,
        single_pool,
        directory,
        access,
    })
}
