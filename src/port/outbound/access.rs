//! Permission check port for administrative operations.

use std::fmt;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Administrative operation, identified by a stable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    SetTokenConfig,
    SetTokenMonitoringEnabled,
    SetTrustedKeeper,
}

impl Operation {
    /// Every administrative operation.
    pub const ALL: [Self; 3] = [
        Self::SetTokenConfig,
        Self::SetTokenMonitoringEnabled,
        Self::SetTrustedKeeper,
    ];

    /// Stable name the permission checker is keyed by.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SetTokenConfig => "set_token_config",
            Self::SetTokenMonitoringEnabled => "set_token_monitoring_enabled",
            Self::SetTrustedKeeper => "set_trusted_keeper",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External permission checker.
pub trait AccessControl: Send + Sync {
    /// Whether `caller` may perform `operation`.
    fn is_allowed(&self, caller: Address, operation: Operation) -> bool;
}
