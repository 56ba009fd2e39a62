//! Exchange-agnostic domain logic: identifiers, configuration, deviation
//! evaluation and per-market restriction state.

mod action;
mod deviation;
mod id;
mod market_state;
mod monitor;

pub mod error;

pub use action::Action;
pub use deviation::{deviation_percent, DeviationReport, Skew};
pub use id::{Address, PoolId, PoolRange};
pub use market_state::{MarketState, RiskParameters};
pub use monitor::{TokenMonitorConfig, MAX_DEVIATION_PERCENT};
