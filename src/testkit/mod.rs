//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Well-known addresses and fixed-point builders.
//! - [`fixture`] - A sentinel wired to in-memory adapters.
//! - [`notifier`] - `RecordingNotifier` capturing published events.

pub mod domain;
pub mod fixture;
pub mod notifier;
