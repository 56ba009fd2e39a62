//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the sentinel's external collaborators: the two
//! price feeds, the comptrollers, market metadata, the permission checker
//! and event notifications.

pub mod access;
pub mod comptroller;
pub mod market;
pub mod notifier;
pub mod price_feed;
