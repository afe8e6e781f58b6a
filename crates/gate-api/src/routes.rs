//! # Routes
//!
//! Axum router configuration for the checkout and download endpoints.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
///   - POST /api/checkout - Create checkout session (other methods → 405)
///   - GET  /api/download?session_id=... - Verified file download
///   - GET  /health, / - Health check
pub fn create_router(state: AppState) -> Router {
    // The storefront may be served from a different origin than the API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/checkout",
            post(handlers::create_checkout).fallback(handlers::checkout_method_not_allowed),
        )
        .route("/download", get(handlers::download));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
