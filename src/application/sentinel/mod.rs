//! Deviation sentinel service.
//!
//! - [`DeviationSentinel`] - evaluation, transitions and administration
//! - [`RiskEngineRegistry`] - resolves comptroller identities to their shape

mod admin;
mod collateral;
mod controller;
mod engines;
mod transition;

pub use controller::{Collaborators, DeviationSentinel};
pub use engines::{RiskEngine, RiskEngineRegistry, WIDE_POOL_RANGE};
