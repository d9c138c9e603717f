use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::models::{
    error_codes, ApiError, BriefRequest, BriefResponse, CreateSessionResponse, SearchRequest,
    SearchResponse, SessionSearchResponse, SessionSnapshot, ToggleSavedResponse,
};
use crate::discovery::{
    Category, ContentFormat, ContentItem, DiscoveryConfig, DiscoveryQuery, DiscoveryService,
    CATEGORIES,
};
use crate::metrics::METRICS;
use crate::oracle::Oracle;
use crate::session::{SessionConfig, SessionError, SessionStore};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub discovery: Arc<DiscoveryService>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(
        oracle: Arc<dyn Oracle>,
        discovery: &DiscoveryConfig,
        sessions: &SessionConfig,
    ) -> Self {
        Self {
            discovery: Arc::new(DiscoveryService::new(oracle, discovery)),
            sessions: Arc::new(SessionStore::new(discovery.history_limit, sessions)),
        }
    }
}

fn validation_error(message: &str) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::new(error_codes::VALIDATION_ERROR, message)),
    )
}

fn session_error(err: SessionError) -> (StatusCode, Json<ApiError>) {
    match err {
        SessionError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ApiError::new(error_codes::NOT_FOUND, err.to_string())),
        ),
    }
}

fn parse_query(request: &SearchRequest) -> Result<DiscoveryQuery, (StatusCode, Json<ApiError>)> {
    DiscoveryQuery::new(request.category, &request.query, request.format).map_err(|e| {
        warn!("Rejected discovery request: {}", e);
        validation_error(&e.to_string())
    })
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /metrics
pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        METRICS.export_prometheus(),
    )
}

/// GET /api/v1/categories
pub async fn list_categories() -> Json<&'static [Category]> {
    Json(&CATEGORIES[..])
}

/// GET /api/v1/formats
pub async fn list_formats() -> Json<Vec<&'static str>> {
    Json(ContentFormat::ALL.iter().map(|f| f.as_str()).collect())
}

/// Ranked discovery results
///
/// POST /api/v1/discovery/search
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<SearchResponse> {
    let query = parse_query(&request)?;
    let items = state.discovery.search(&query).await;
    Ok(Json(SearchResponse { items }))
}

/// AI brief for a topic
///
/// POST /api/v1/brief
pub async fn brief(
    State(state): State<AppState>,
    Json(request): Json<BriefRequest>,
) -> ApiResult<BriefResponse> {
    if request.topic.trim().is_empty() {
        return Err(validation_error("Topic cannot be empty"));
    }

    let brief = state
        .discovery
        .request_brief(&request.topic, request.context.as_deref())
        .await;
    Ok(Json(BriefResponse { brief }))
}

/// POST /api/v1/sessions
pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = state.sessions.create();
    (StatusCode::CREATED, Json(CreateSessionResponse { session_id }))
}

/// GET /api/v1/sessions/:id
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<SessionSnapshot> {
    let session = state.sessions.get(session_id).map_err(session_error)?;
    let results = session.results();
    let lists = session.lists();

    Ok(Json(SessionSnapshot {
        session_id,
        sequence: results.sequence,
        loading: results.loading,
        results: results.items,
        history: lists.history().to_vec(),
        saved: lists.saved().to_vec(),
    }))
}

/// DELETE /api/v1/sessions/:id
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    state.sessions.remove(session_id).map_err(session_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Search whose results become the session's displayed results unless a
/// newer search in the same session finishes first
///
/// POST /api/v1/sessions/:id/discovery
pub async fn session_search(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<SessionSearchResponse> {
    let session = state.sessions.get(session_id).map_err(session_error)?;
    let query = parse_query(&request)?;

    let outcome = state.discovery.search_into(&session.slot, &query).await;

    Ok(Json(SessionSearchResponse {
        items: outcome.items,
        sequence: outcome.ticket.sequence(),
        applied: outcome.applied,
    }))
}

/// POST /api/v1/sessions/:id/history
pub async fn record_history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(item): Json<ContentItem>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    let session = state.sessions.get(session_id).map_err(session_error)?;
    info!(session = %session_id, item = %item.id, "Item opened");
    session.record_view(item);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/saved
pub async fn toggle_saved(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(item): Json<ContentItem>,
) -> ApiResult<ToggleSavedResponse> {
    let session = state.sessions.get(session_id).map_err(session_error)?;
    let saved = session.toggle_saved(item);
    Ok(Json(ToggleSavedResponse { saved }))
}
