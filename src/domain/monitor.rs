//! Per-token monitoring configuration.

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Largest deviation threshold that can be configured, in percent.
pub const MAX_DEVIATION_PERCENT: u8 = 100;

/// Monitoring configuration for one underlying token.
///
/// A threshold of zero means "never configured" and cannot be constructed
/// through [`TokenMonitorConfig::try_new`]. Disabling a token stops
/// enforcement but deviation checks stay available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMonitorConfig {
    deviation_percent: u8,
    enabled: bool,
}

impl TokenMonitorConfig {
    /// Create a config, rejecting thresholds outside `1..=100`.
    pub fn try_new(deviation_percent: u8, enabled: bool) -> Result<Self, DomainError> {
        if deviation_percent == 0 || deviation_percent > MAX_DEVIATION_PERCENT {
            return Err(DomainError::InvalidThreshold {
                value: deviation_percent,
            });
        }
        Ok(Self {
            deviation_percent,
            enabled,
        })
    }

    /// Threshold in whole percent.
    #[must_use]
    pub const fn deviation_percent(&self) -> u8 {
        self.deviation_percent
    }

    /// Whether enforcement is active for this token.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Copy of this config with a different enforcement flag.
    #[must_use]
    pub const fn with_enabled(self, enabled: bool) -> Self {
        Self {
            deviation_percent: self.deviation_percent,
            enabled,
        }
    }
}
