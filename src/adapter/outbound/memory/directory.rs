//! In-memory market directory.

use std::collections::BTreeMap;

use alloy_primitives::Address;
use parking_lot::RwLock;

use crate::port::outbound::market::{LookupError, MarketDirectory};

#[derive(Debug, Clone, Copy)]
struct MarketEntry {
    underlying: Address,
    comptroller: Address,
}

/// Market metadata registered up front.
#[derive(Default)]
pub struct StaticMarketDirectory {
    markets: RwLock<BTreeMap<Address, MarketEntry>>,
}

impl StaticMarketDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, market: Address, underlying: Address, comptroller: Address) {
        self.markets.write().insert(
            market,
            MarketEntry {
                underlying,
                comptroller,
            },
        );
    }

    /// Every registered market, in address order.
    #[must_use]
    pub fn markets(&self) -> Vec<Address> {
        self.markets.read().keys().copied().collect()
    }

    fn entry(&self, market: Address) -> Result<MarketEntry, LookupError> {
        self.markets
            .read()
            .get(&market)
            .copied()
            .ok_or(LookupError::UnknownMarket(market))
    }
}

impl MarketDirectory for StaticMarketDirectory {
    fn underlying(&self, market: Address) -> Result<Address, LookupError> {
        self.entry(market).map(|e| e.underlying)
    }

    fn comptroller(&self, market: Address) -> Result<Address, LookupError> {
        self.entry(market).map(|e| e.comptroller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_registered_market() {
        let directory = StaticMarketDirectory::new();
        let market = Address::repeat_byte(1);
        directory.register(market, Address::repeat_byte(2), Address::repeat_byte(3));

        assert_eq!(directory.underlying(market), Ok(Address::repeat_byte(2)));
        assert_eq!(directory.comptroller(market), Ok(Address::repeat_byte(3)));
    }

    #[test]
    fn unknown_market_fails() {
        let directory = StaticMarketDirectory::new();
        let market = Address::repeat_byte(7);
        assert_eq!(
            directory.underlying(market),
            Err(LookupError::UnknownMarket(market))
        );
    }
}
