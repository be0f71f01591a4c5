use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::infra::errors::AppError;

/// Reject requests whose body is not `multipart/*` with 415 before the
/// handler tries to parse a form out of it.
pub async fn require_multipart(request: Request, next: Next) -> Response {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !content_type
        .trim_start()
        .to_ascii_lowercase()
        .starts_with("multipart/")
    {
        debug!(content_type, "rejecting non-multipart body");
        return AppError::unsupported_media_type(
            "Expected a multipart/form-data request body",
        )
        .into_response();
    }

    next.run(request).await
}
