use crate::handlers;
use crate::state::AppState;
use axum::{Router, routing::get};
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::TraceLayer;

/// Build and configure the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // KV routes
        .route("/kv/set", get(handlers::set_value))
        .route("/kv/get", get(handlers::get_value))
        // Middleware
        .layer(NormalizePathLayer::trim_trailing_slash())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
