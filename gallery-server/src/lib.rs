//! # Gallery Server
//!
//! HTTP front end for the image gallery.
//!
//! ## Overview
//!
//! - **Images**: CRUD over image metadata under `/api/v1/image`
//! - **Sessions**: a `GALLERY_SESSION` cookie binds requests to a session
//! - **Notifications**: every API response is the pair
//!   `[payload, messages]`, where `messages` holds everything the session
//!   has been told so far
//!
//! ## Architecture
//!
//! The server is built on Axum and uses:
//! - PostgreSQL for image metadata (in memory when not configured)
//! - Redis for session attributes (in memory when not configured)

pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;

use axum::{Router, http::Method, routing::get};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::system::{health_handler, ping_handler};

pub fn create_app(state: AppState) -> Router {
    // Create versioned API routes
    let versioned_api = routes::create_api_router(state.clone());

    // Build CORS layer (permissive in dev, allow-list in prod)
    let cors_layer = if state.config().dev_mode {
        CorsLayer::permissive()
    } else {
        let origins: Vec<axum::http::HeaderValue> = state
            .config()
            .cors_allowed_origins
            .iter()
            .filter_map(|s| axum::http::HeaderValue::from_str(s).ok())
            .collect();
        let allow_origin = if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any)
    };

    Router::new()
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
        // Add versioned API routes
        .merge(versioned_api)
        // Later layers wrap earlier ones; CORS ends up outermost
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}
