//! Lending actions that a comptroller can pause per market.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Market action as enumerated by the comptroller.
///
/// Discriminants follow the comptroller's own numbering. Supplying to a
/// market is the `Mint` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Action {
    Mint = 0,
    Redeem = 1,
    Borrow = 2,
    Repay = 3,
    Seize = 4,
    Liquidate = 5,
    Transfer = 6,
    EnterMarket = 7,
    ExitMarket = 8,
}

impl Action {
    /// The action paused when supply must be restricted.
    pub const SUPPLY: Self = Self::Mint;

    /// Stable name used in logs and command output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mint => "mint",
            Self::Redeem => "redeem",
            Self::Borrow => "borrow",
            Self::Repay => "repay",
            Self::Seize => "seize",
            Self::Liquidate => "liquidate",
            Self::Transfer => "transfer",
            Self::EnterMarket => "enter_market",
            Self::ExitMarket => "exit_market",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
