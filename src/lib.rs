//! Sentinel - price deviation protection for lending markets.
//!
//! Watches the underlying token of each lending market through two
//! independent price feeds. When they disagree by more than a per-token
//! threshold the market is restricted on its comptroller; once they realign
//! every restriction is lifted and original risk parameters are restored.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **`domain`** - Deviation math, token configs, per-market protective state
//! - **`port`** - Traits for price feeds, comptrollers, access control, notifiers
//! - **`application`** - `DeviationSentinel`, shared state, keeper loop
//! - **`adapter`** - CLI and in-memory implementations of every port
//! - **`infrastructure`** - Configuration and runtime wiring
//!
//! # Restrictions
//!
//! - Secondary price above primary: borrowing is paused.
//! - Secondary price below primary: collateral factor is zeroed (per pool on
//!   the multi-pool comptroller) and supply is paused.
//! - Feeds back within threshold: everything above is undone.
//!
//! # Example
//!
//! ```no_run
//! use sentinel::infrastructure::bootstrap::build_paper_environment;
//! use sentinel::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     let env = build_paper_environment(&config)?;
//!     for market in env.markets() {
//!         let report = env.sentinel.check_price_deviation(market)?;
//!         println!("{market}: {}%", report.deviation_percent());
//!     }
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
