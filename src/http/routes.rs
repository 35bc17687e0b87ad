use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Chunk ingest (the trailing slash is part of the public path)
        .route("/upload-audio/", post(handlers::upload_audio))
        // Event relay
        .route("/stream-events/:session_id", get(handlers::stream_events))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        // Browser clients connect from any origin, with credentials
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
