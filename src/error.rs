use alloy_primitives::Address;
use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::PoolId;
use crate::port::outbound::access::Operation;
use crate::port::outbound::comptroller::EngineError;
use crate::port::outbound::market::LookupError;
use crate::port::outbound::price_feed::FeedError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors surfaced by sentinel operations.
///
/// A returned error always means no flag, snapshot or event was committed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SentinelError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{caller} is not allowed to call {operation}")]
    Unauthorized { operation: Operation, caller: Address },

    #[error("{caller} is not a trusted keeper")]
    UntrustedKeeper { caller: Address },

    #[error("no deviation threshold configured for token {token}")]
    NotConfigured { token: Address },

    #[error("monitoring is disabled for token {token}")]
    MonitoringDisabled { token: Address },

    #[error("comptroller {comptroller} is not a known risk engine")]
    UnknownRiskEngine { comptroller: Address },

    #[error("{feed} price unavailable for token {token}: {source}")]
    PriceUnavailable {
        feed: String,
        token: Address,
        #[source]
        source: FeedError,
    },

    #[error("comptroller rejected collateral factor update for pool {pool} with code {code}")]
    CollateralFactorRejected { pool: PoolId, code: u64 },

    #[error("comptroller call {operation} failed: {source}")]
    RiskEngine {
        operation: &'static str,
        #[source]
        source: EngineError,
    },

    #[error("failed to resolve market {market}: {source}")]
    MarketLookup {
        market: Address,
        #[source]
        source: LookupError,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sentinel(#[from] SentinelError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<DomainError> for Error {
    fn from(err: DomainError) -> Self {
        Error::Sentinel(SentinelError::Domain(err))
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Task(err.to_string())
    }
}
