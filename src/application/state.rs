//! Shared sentinel state.
//!
//! Holds the per-market restriction state, the per-token monitoring configs
//! and the trusted keeper set. Each market has its own mutex; a transition
//! holds it from evaluation until commit, so racing keepers on one market are
//! serialized while different markets proceed independently.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use alloy_primitives::Address;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};

use crate::domain::{MarketState, TokenMonitorConfig};

/// Shared state accessible by the sentinel and its administrators.
#[derive(Default)]
pub struct SentinelState {
    /// Restriction state per market, created lazily on first transition.
    markets: DashMap<Address, Arc<Mutex<MarketState>>>,
    /// Monitoring config per underlying token.
    token_configs: RwLock<HashMap<Address, TokenMonitorConfig>>,
    /// Keepers allowed to trigger transitions.
    keepers: RwLock<HashSet<Address>>,
}

impl SentinelState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock slot for `market`, creating an empty state on first use.
    pub(crate) fn market_slot(&self, market: Address) -> Arc<Mutex<MarketState>> {
        self.markets.entry(market).or_default().value().clone()
    }

    /// Snapshot of the committed state of `market`.
    #[must_use]
    pub fn market_state(&self, market: Address) -> MarketState {
        self.markets
            .get(&market)
            .map(|slot| slot.lock().clone())
            .unwrap_or_default()
    }

    /// Markets that currently hold at least one restriction.
    #[must_use]
    pub fn restricted_markets(&self) -> Vec<Address> {
        self.markets
            .iter()
            .filter(|entry| entry.value().lock().is_restricted())
            .map(|entry| *entry.key())
            .collect()
    }

    #[must_use]
    pub fn token_config(&self, token: Address) -> Option<TokenMonitorConfig> {
        self.token_configs.read().get(&token).copied()
    }

    pub fn set_token_config(&self, token: Address, config: TokenMonitorConfig) {
        self.token_configs.write().insert(token, config);
    }

    /// Flip the enforcement flag of an existing config.
    ///
    /// Returns the updated config, or `None` if the token was never configured.
    pub fn set_token_enabled(&self, token: Address, enabled: bool) -> Option<TokenMonitorConfig> {
        let mut configs = self.token_configs.write();
        let config = configs.get_mut(&token)?;
        *config = config.with_enabled(enabled);
        Some(*config)
    }

    #[must_use]
    pub fn is_trusted_keeper(&self, keeper: Address) -> bool {
        self.keepers.read().contains(&keeper)
    }

    pub fn set_keeper(&self, keeper: Address, trusted: bool) {
        let mut keepers = self.keepers.write();
        if trusted {
            keepers.insert(keeper);
        } else {
            keepers.remove(&keeper);
        }
    }

    #[must_use]
    pub fn keeper_count(&self) -> usize {
        self.keepers.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_market_reads_default_state() {
        let state = SentinelState::new();
        assert_eq!(
            state.market_state(Address::repeat_byte(1)),
            MarketState::default()
        );
        assert!(state.restricted_markets().is_empty());
    }

    #[test]
    fn market_slot_is_shared() {
        let state = SentinelState::new();
        let market = Address::repeat_byte(1);
        state.market_slot(market).lock().set_borrow_paused(true);

        assert!(state.market_state(market).borrow_paused());
        assert_eq!(state.restricted_markets(), vec![market]);
    }

    #[test]
    fn keepers_are_added_and_removed() {
        let state = SentinelState::new();
        let keeper = Address::repeat_byte(9);

        state.set_keeper(keeper, true);
        assert!(state.is_trusted_keeper(keeper));
        assert_eq!(state.keeper_count(), 1);

        state.set_keeper(keeper, false);
        assert!(!state.is_trusted_keeper(keeper));
    }

    #[test]
    fn set_token_enabled_requires_existing_config() {
        let state = SentinelState::new();
        let token = Address::repeat_byte(2);
        assert!(state.set_token_enabled(token, false).is_none());

        state.set_token_config(token, TokenMonitorConfig::try_new(10, true).unwrap());
        let updated = state.set_token_enabled(token, false).unwrap();
        assert!(!updated.enabled());
        assert_eq!(state.token_config(token), Some(updated));
    }
}
