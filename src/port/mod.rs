//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  DeviationSentinel      ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌──────────┐           ┌─────────────┐              ┌───────────┐
//! │PriceFeed │           │ Comptroller │              │ Notifier  │
//! │ Adapters │           │  Adapters   │              │  Adapter  │
//! └──────────┘           └─────────────┘              └───────────┘
//! ```

pub mod inbound;
pub mod outbound;
