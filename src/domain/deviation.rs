//! Price deviation evaluation.
//!
//! Compares a primary and a secondary price for the same token. Both prices
//! must share one fixed-point convention (`36 - token decimals`), otherwise
//! the percentage is meaningless.
//!
//! # Examples
//!
//! ```
//! use alloy_primitives::U256;
//! use sentinel::domain::{DeviationReport, Skew};
//!
//! let report = DeviationReport::evaluate(U256::from(100), U256::from(115), 10);
//! assert!(report.has_deviation());
//! assert_eq!(report.deviation_percent(), U256::from(15));
//! assert_eq!(report.skew(), Skew::High);
//! ```

use alloy_primitives::U256;
use serde::Serialize;

/// Which side the secondary price sits on relative to the primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Skew {
    /// Secondary price above primary.
    High,
    /// Secondary price at or below primary.
    Low,
}

/// Outcome of comparing the two feed prices against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviationReport {
    primary: U256,
    secondary: U256,
    deviation_percent: U256,
    threshold: u8,
    has_deviation: bool,
}

impl DeviationReport {
    /// Evaluate two prices against `threshold` percent.
    ///
    /// A zero reading on either side is a feed failure and reports maximal
    /// deviation. Equality with the threshold counts as a deviation.
    #[must_use]
    pub fn evaluate(primary: U256, secondary: U256, threshold: u8) -> Self {
        let deviation_percent = deviation_percent(primary, secondary);
        Self {
            primary,
            secondary,
            deviation_percent,
            threshold,
            has_deviation: deviation_percent >= U256::from(threshold),
        }
    }

    #[must_use]
    pub const fn primary(&self) -> U256 {
        self.primary
    }

    #[must_use]
    pub const fn secondary(&self) -> U256 {
        self.secondary
    }

    /// Floor of `|secondary - primary| * 100 / primary`.
    #[must_use]
    pub const fn deviation_percent(&self) -> U256 {
        self.deviation_percent
    }

    #[must_use]
    pub const fn threshold(&self) -> u8 {
        self.threshold
    }

    #[must_use]
    pub const fn has_deviation(&self) -> bool {
        self.has_deviation
    }

    /// Direction of the disagreement; selects the remedy.
    #[must_use]
    pub fn skew(&self) -> Skew {
        if self.secondary > self.primary {
            Skew::High
        } else {
            Skew::Low
        }
    }
}

/// Relative difference in whole percent, `U256::MAX` if either price is zero.
#[must_use]
pub fn deviation_percent(primary: U256, secondary: U256) -> U256 {
    if primary.is_zero() || secondary.is_zero() {
        return U256::MAX;
    }

    let diff = if secondary > primary {
        secondary - primary
    } else {
        primary - secondary
    };

    // Overflow only happens for absurd prices; report it as maximal.
    diff.checked_mul(U256::from(100u8))
        .map_or(U256::MAX, |scaled| scaled / primary)
}
