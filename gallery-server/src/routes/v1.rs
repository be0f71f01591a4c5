use axum::{
    Router, middleware,
    routing::{get, post},
};
use gallery_core::api::routes::v1;

use crate::{
    AppState,
    handlers::images,
    infra::middleware::{envelope_middleware, require_multipart, session_middleware},
};

/// Create all v1 API routes. Every response is wrapped in the notification
/// envelope of the caller's session.
pub fn create_v1_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(v1::images::LIST, get(images::list_images_handler))
        .route(
            v1::images::ITEM,
            get(images::get_image_handler).delete(images::delete_image_handler),
        )
        .merge(create_upload_routes())
        // Inner to outer: the envelope needs the session resolved first
        .layer(middleware::from_fn(envelope_middleware))
        .layer(middleware::from_fn_with_state(state, session_middleware))
}

/// Routes that take a multipart form
fn create_upload_routes() -> Router<AppState> {
    Router::new()
        .route(
            v1::images::COLLECTION,
            post(images::create_image_handler).put(images::update_image_handler),
        )
        .route_layer(middleware::from_fn(require_multipart))
}
