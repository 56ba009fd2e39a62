//! In-memory price feed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use alloy_primitives::{Address, U256};
use parking_lot::RwLock;

use crate::port::outbound::price_feed::{FeedError, PriceFeed};

/// Price feed backed by a settable table.
///
/// Tokens without an entry have no price route. The feed can be switched
/// offline to simulate an unreachable source.
pub struct StaticPriceFeed {
    name: String,
    prices: RwLock<HashMap<Address, U256>>,
    offline: RwLock<Option<String>>,
    reads: AtomicUsize,
}

impl StaticPriceFeed {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prices: RwLock::new(HashMap::new()),
            offline: RwLock::new(None),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn set_price(&self, token: Address, price: U256) {
        self.prices.write().insert(token, price);
    }

    pub fn remove_price(&self, token: Address) {
        self.prices.write().remove(&token);
    }

    /// Make every read fail with `reason`; `None` brings the feed back.
    pub fn set_offline(&self, reason: Option<String>) {
        *self.offline.write() = reason;
    }

    /// Number of price reads served or refused so far.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl PriceFeed for StaticPriceFeed {
    fn name(&self) -> &str {
        &self.name
    }

    fn price(&self, token: Address) -> Result<U256, FeedError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = self.offline.read().clone() {
            return Err(FeedError::Unavailable(reason));
        }
        self.prices
            .read()
            .get(&token)
            .copied()
            .ok_or(FeedError::NoRoute { token })
    }
}
