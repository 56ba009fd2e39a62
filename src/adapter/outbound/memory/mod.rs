//! In-memory implementations of every outbound port.
//!
//! Back the paper environment of the CLI and the test suites.

mod access;
mod comptroller;
mod directory;
mod feed;

pub use access::RoleAccessControl;
pub use comptroller::{
    EngineCall, MemoryMultiPoolComptroller, MemorySinglePoolComptroller, MARKET_NOT_LISTED,
};
pub use directory::StaticMarketDirectory;
pub use feed::StaticPriceFeed;
