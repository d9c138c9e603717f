//! Discovery pipeline
//!
//! Query formatting, the oracle gateway, and ranking of returned records:
//! - `formatter` builds instructions and the record schema
//! - `gateway` makes the single oracle call and absorbs its failures
//! - `ranker` validates records, derives the engagement ratio and sorts
//! - `slot` keeps a session on the results of its latest search

pub mod config;
pub mod formatter;
pub mod gateway;
pub mod models;
pub mod ranker;
pub mod service;
pub mod slot;

pub use config::DiscoveryConfig;
pub use gateway::{OracleGateway, NO_BRIEF};
pub use models::{Category, CategoryId, ContentFormat, ContentItem, DiscoveryQuery, CATEGORIES};
pub use ranker::{engagement_ratio, Ranker, Ranking};
pub use service::{DiscoveryService, SlotOutcome};
pub use slot::{ResultSlot, SlotSnapshot, Ticket};
