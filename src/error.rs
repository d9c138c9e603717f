//! Error types for the discovery core
//!
//! Component errors stay local to their modules; `FocusError` is the
//! crate-level error for configuration and wiring failures.

use thiserror::Error;

/// Result alias for crate-level operations
pub type Result<T> = std::result::Result<T, FocusError>;

/// Failure kinds of the discovery pipeline.
///
/// None of these reach the presentation layer: the gateway and the ranker
/// absorb them into an empty (or shorter) result sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error("Oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("Malformed oracle response: {0}")]
    MalformedResponse(String),

    #[error("Partial record: {0}")]
    PartialRecord(String),
}

/// Crate-level error
#[derive(Debug, Error)]
pub enum FocusError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<config::ConfigError> for FocusError {
    fn from(err: config::ConfigError) -> Self {
        FocusError::Config(err.to_string())
    }
}
