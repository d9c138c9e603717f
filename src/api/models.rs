//! Request and response bodies for the HTTP API

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::discovery::{CategoryId, ContentFormat, ContentItem};

/// Discovery search request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub category: CategoryId,
    pub query: String,
    #[serde(default)]
    pub format: ContentFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<ContentItem>,
}

/// Search routed through a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSearchResponse {
    pub items: Vec<ContentItem>,
    pub sequence: u64,
    /// False when a newer search in the same session superseded this one
    pub applied: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BriefRequest {
    pub topic: String,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BriefResponse {
    pub brief: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub sequence: u64,
    pub loading: bool,
    pub results: Vec<ContentItem>,
    pub history: Vec<ContentItem>,
    pub saved: Vec<ContentItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleSavedResponse {
    pub saved: bool,
}

/// API error details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Error codes used in [`ApiError::code`]
pub mod error_codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
}
