//! Domain identifier types.
//!
//! Accounts (markets, tokens, keepers, comptrollers) are plain 20-byte
//! addresses. Pools of a multi-pool comptroller get their own newtype so a
//! pool id can never be confused with a raw counter.

use std::fmt;

use serde::{Deserialize, Serialize};

pub use alloy_primitives::Address;

/// Identifier of a risk-parameter pool (e-mode group) in a multi-pool comptroller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PoolId(u64);

impl PoolId {
    /// Create a new `PoolId`.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw pool number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PoolId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Inclusive range of pool ids currently valid in a multi-pool comptroller.
///
/// Always rebuilt from the comptroller on use; new pools extend `last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolRange {
    first: PoolId,
    last: PoolId,
}

impl PoolRange {
    /// Create a range spanning `first..=last`. Empty when `first > last`.
    #[must_use]
    pub const fn new(first: PoolId, last: PoolId) -> Self {
        Self { first, last }
    }

    /// Iterate every pool id in the range.
    pub fn iter(&self) -> impl Iterator<Item = PoolId> {
        (self.first.get()..=self.last.get()).map(PoolId::new)
    }

    /// Number of pool ids in the range.
    #[must_use]
    pub fn width(&self) -> u64 {
        if self.first > self.last {
            return 0;
        }
        (self.last.get() - self.first.get()).saturating_add(1)
    }
}
