//! Generative oracle access
//!
//! The oracle is an opaque function from (instruction, optional schema) to
//! text. `GeminiOracle` talks to the real provider; `StaticOracle` returns
//! canned answers for tests and offline runs.

pub mod circuit_breaker;
pub mod config;
pub mod gemini;
pub mod models;
pub mod stub;

pub use circuit_breaker::{BreakerState, BreakerStats, CircuitBreaker, CircuitBreakerConfig};
pub use config::OracleConfig;
pub use gemini::GeminiOracle;
pub use stub::StaticOracle;

use async_trait::async_trait;

/// Oracle operation, used for metrics labels and per-operation breakers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OracleOperation {
    Discover,
    Brief,
}

impl OracleOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discover => "discover",
            Self::Brief => "brief",
        }
    }
}

/// A single oracle call
#[derive(Debug, Clone)]
pub struct OracleRequest {
    pub operation: OracleOperation,
    pub instruction: String,
    /// Structured-output schema; `None` asks for free text
    pub schema: Option<serde_json::Value>,
}

impl OracleRequest {
    pub fn structured(instruction: String, schema: serde_json::Value) -> Self {
        Self {
            operation: OracleOperation::Discover,
            instruction,
            schema: Some(schema),
        }
    }

    pub fn text(instruction: String) -> Self {
        Self {
            operation: OracleOperation::Brief,
            instruction,
            schema: None,
        }
    }
}

/// Oracle error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum OracleError {
    #[error("Oracle integration is disabled")]
    Disabled,

    #[error("Circuit breaker is open: {0}")]
    CircuitOpen(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Text-completion oracle.
///
/// `Ok(None)` means the provider answered without any text.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn generate(&self, request: OracleRequest) -> Result<Option<String>, OracleError>;
}
