//! FocusStream discovery core
//!
//! Turns a (category, query, format) request into a ranked list of
//! high-value content items synthesized by a generative oracle, and asks
//! the same oracle for short topic briefs.

pub mod api;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod oracle;
pub mod session;

pub use config::Config;
pub use discovery::{
    CategoryId, ContentFormat, ContentItem, DiscoveryQuery, DiscoveryService, NO_BRIEF,
};
pub use error::{DiscoveryError, FocusError, Result};
pub use oracle::{GeminiOracle, Oracle, OracleConfig, StaticOracle};
