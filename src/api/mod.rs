//! HTTP routes and handlers

use axum::{Router, middleware as axum_middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub mod auth;
pub mod forms;
pub mod pages;
pub mod producten;
pub mod profiel;
pub mod uploads;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Public catalog pages
        .merge(pages::router())
        // Login/logout
        .merge(auth::router())
        // Admin profile - session required
        .merge(profiel::router())
        // Product administration - session required
        .merge(producten::router())
        // Normalized image files
        .merge(uploads::router())
}

/// Build the fully configured application with middleware attached
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // CORS - handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - gzip responses
        .layer(CompressionLayer::new())
        // Trace - request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Session lookup - injects CurrentAdmin, guards the back-office paths
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::auth::session_gate,
        ))
}
