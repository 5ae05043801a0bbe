//! API Routes
//!
//! Configures the Axum router with all key-value server endpoints.

use axum::{
    routing::{any, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    get_handler, health_handler, malformed_request_handler, stats_handler, write_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /key/{key}` - Read a value
/// - `POST /key/{key}` - Store (`value` form field) or delete (empty form)
/// - `GET /stats` - Storage statistics
/// - `GET /health` - Health check endpoint
///
/// The key is the whole remainder of the path after `/key/` and may contain
/// `/`. A key path without a key, or any other method on a key path, is
/// answered with 400.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/key/*key",
            get(get_handler)
                .post(write_handler)
                .fallback(malformed_request_handler),
        )
        .route("/key", any(malformed_request_handler))
        .route("/key/", any(malformed_request_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
