//! Router configuration

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{self, AppState};

/// Build the full API router
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .route("/api/v1/categories", get(handlers::list_categories))
        .route("/api/v1/formats", get(handlers::list_formats))
        .route("/api/v1/discovery/search", post(handlers::search))
        .route("/api/v1/brief", post(handlers::brief))
        .route("/api/v1/sessions", post(handlers::create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/api/v1/sessions/:id/discovery", post(handlers::session_search))
        .route("/api/v1/sessions/:id/history", post(handlers::record_history))
        .route("/api/v1/sessions/:id/saved", post(handlers::toggle_saved))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
