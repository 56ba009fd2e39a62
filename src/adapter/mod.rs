//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - Driving adapters (CLI)
//! - [`outbound`] - Driven adapters (in-memory feeds, comptrollers, directory)

pub mod inbound;
pub mod outbound;
