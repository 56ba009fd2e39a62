//! Notifier port for sentinel events.
//!
//! Every state change the sentinel commits is announced as an [`Event`].
//! Events are published only after a transition commits; a rejected
//! transition publishes nothing.

use alloy_primitives::{Address, U256};
use serde::Serialize;

use crate::domain::{PoolId, RiskParameters, Skew, TokenMonitorConfig};

/// Events emitted by the sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A keeper was added to or removed from the trusted set.
    TrustedKeeperUpdated { keeper: Address, trusted: bool },
    /// A token's monitoring config was written.
    TokenConfigUpdated {
        token: Address,
        config: TokenMonitorConfig,
    },
    /// Enforcement was switched on or off for a token.
    TokenMonitoringStatusChanged { token: Address, enabled: bool },
    /// A deviation led to a restriction.
    DeviationDetected(DeviationEvent),
    BorrowPaused { market: Address },
    BorrowUnpaused { market: Address },
    SupplyPaused { market: Address },
    SupplyUnpaused { market: Address },
    /// Collateral factor set to zero. `pool` is `None` for single-pool comptrollers.
    CollateralFactorZeroed {
        market: Address,
        pool: Option<PoolId>,
        previous: RiskParameters,
    },
    /// Collateral factor written back from a snapshot.
    CollateralFactorRestored {
        market: Address,
        pool: Option<PoolId>,
        restored: RiskParameters,
    },
}

/// Deviation details attached to [`Event::DeviationDetected`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviationEvent {
    pub market: Address,
    pub primary: U256,
    pub secondary: U256,
    pub deviation_percent: U256,
    pub skew: Skew,
}

/// Trait for event handlers.
///
/// Implementations must be thread-safe and return quickly.
pub trait Notifier: Send + Sync {
    /// Handle an event.
    fn notify(&self, event: Event);
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Notify all registered notifiers.
    pub fn notify_all(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A no-op notifier.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}

/// A notifier that logs events via tracing.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        use tracing::info;
        match event {
            Event::TrustedKeeperUpdated { keeper, trusted } => {
                info!(%keeper, trusted, "Trusted keeper updated");
            }
            Event::TokenConfigUpdated { token, config } => {
                info!(
                    %token,
                    deviation_percent = config.deviation_percent(),
                    enabled = config.enabled(),
                    "Token config updated"
                );
            }
            Event::TokenMonitoringStatusChanged { token, enabled } => {
                info!(%token, enabled, "Token monitoring status changed");
            }
            Event::DeviationDetected(e) => {
                info!(
                    market = %e.market,
                    primary = %e.primary,
                    secondary = %e.secondary,
                    deviation = %e.deviation_percent,
                    skew = ?e.skew,
                    "Deviation detected"
                );
            }
            Event::BorrowPaused { market } => info!(%market, "Borrow paused"),
            Event::BorrowUnpaused { market } => info!(%market, "Borrow unpaused"),
            Event::SupplyPaused { market } => info!(%market, "Supply paused"),
            Event::SupplyUnpaused { market } => info!(%market, "Supply unpaused"),
            Event::CollateralFactorZeroed {
                market,
                pool,
                previous,
            } => {
                info!(
                    %market,
                    pool = ?pool.map(PoolId::get),
                    previous_cf = %previous.collateral_factor,
                    "Collateral factor zeroed"
                );
            }
            Event::CollateralFactorRestored {
                market,
                pool,
                restored,
            } => {
                info!(
                    %market,
                    pool = ?pool.map(PoolId::get),
                    restored_cf = %restored.collateral_factor,
                    "Collateral factor restored"
                );
            }
        }
    }
}
