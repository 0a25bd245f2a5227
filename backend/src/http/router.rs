//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Stateless queries
        .route("/options", get(handlers::get_initial_options))
        .route("/domains", get(handlers::get_domains))
        .route("/resolve", post(handlers::resolve_selection))
        // Sessions
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/{session_id}",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/sessions/{session_id}/indicator", put(handlers::change_indicator))
        .route("/sessions/{session_id}/selection", patch(handlers::stage_selection))
        .route("/sessions/{session_id}/initial-load", post(handlers::initial_load))
        .route("/sessions/{session_id}/apply", post(handlers::apply_selection))
        .route("/sessions/{session_id}/chart", get(handlers::get_chart))
        .route("/sessions/{session_id}/export", get(handlers::export_chart));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
