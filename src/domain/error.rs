//! Domain validation errors.
//!
//! Returned by constructors and administrative setters before any state is
//! touched.
//!
//! # Examples
//!
//! ```
//! use sentinel::domain::error::DomainError;
//! use sentinel::domain::TokenMonitorConfig;
//!
//! let result = TokenMonitorConfig::try_new(0, true);
//! assert!(matches!(result, Err(DomainError::InvalidThreshold { value: 0 })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An account argument was the zero address.
    #[error("zero address is not allowed")]
    ZeroAddress,

    /// Deviation threshold outside `1..=100`.
    #[error("deviation threshold must be between 1 and 100 percent, got {value}")]
    InvalidThreshold {
        /// The rejected threshold.
        value: u8,
    },
}
