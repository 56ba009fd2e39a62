//! Administrative entry points: keepers and per-token configuration.
//!
//! Every call is checked against the external permission checker before any
//! validation or state change.

use alloy_primitives::Address;
use tracing::warn;

use super::controller::DeviationSentinel;
use crate::domain::error::DomainError;
use crate::domain::TokenMonitorConfig;
use crate::error::SentinelError;
use crate::port::outbound::access::Operation;
use crate::port::outbound::notifier::Event;

impl DeviationSentinel {
    /// Add `keeper` to, or remove it from, the trusted keeper set.
    pub fn set_trusted_keeper(
        &self,
        caller: Address,
        keeper: Address,
        trusted: bool,
    ) -> Result<(), SentinelError> {
        self.ensure_allowed(caller, Operation::SetTrustedKeeper)?;
        non_zero(keeper)?;

        self.state.set_keeper(keeper, trusted);
        self.notifier
            .notify_all(Event::TrustedKeeperUpdated { keeper, trusted });
        Ok(())
    }

    /// Write the monitoring config of `token`, replacing any previous one.
    pub fn set_token_config(
        &self,
        caller: Address,
        token: Address,
        config: TokenMonitorConfig,
    ) -> Result<(), SentinelError> {
        self.ensure_allowed(caller, Operation::SetTokenConfig)?;
        non_zero(token)?;

        self.state.set_token_config(token, config);
        self.notifier
            .notify_all(Event::TokenConfigUpdated { token, config });
        Ok(())
    }

    /// Switch enforcement for an already configured `token`.
    pub fn set_token_monitoring_enabled(
        &self,
        caller: Address,
        token: Address,
        enabled: bool,
    ) -> Result<(), SentinelError> {
        self.ensure_allowed(caller, Operation::SetTokenMonitoringEnabled)?;
        non_zero(token)?;

        self.state
            .set_token_enabled(token, enabled)
            .ok_or(SentinelError::NotConfigured { token })?;
        self.notifier
            .notify_all(Event::TokenMonitoringStatusChanged { token, enabled });
        Ok(())
    }

    #[must_use]
    pub fn token_config(&self, token: Address) -> Option<TokenMonitorConfig> {
        self.state.token_config(token)
    }

    #[must_use]
    pub fn is_trusted_keeper(&self, keeper: Address) -> bool {
        self.state.is_trusted_keeper(keeper)
    }

    fn ensure_allowed(&self, caller: Address, operation: Operation) -> Result<(), SentinelError> {
        if self.access.is_allowed(caller, operation) {
            return Ok(());
        }
        warn!(%caller, operation = %operation, "Unauthorized administrative call");
        Err(SentinelError::Unauthorized { operation, caller })
    }
}

fn non_zero(address: Address) -> Result<(), DomainError> {
    if address.is_zero() {
        return Err(DomainError::ZeroAddress);
    }
    Ok(())
}
