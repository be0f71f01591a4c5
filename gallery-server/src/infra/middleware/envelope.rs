use axum::{
    body::{Body, Bytes, to_bytes},
    extract::Request,
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use gallery_core::{NotificationService, ResponseEnvelope};
use serde_json::Value;
use tracing::error;

use crate::infra::errors::AppError;

/// Inner responses larger than this are not buffered for wrapping.
const MAX_WRAPPED_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Wrap every response as `[payload, messages]`, where `messages` is the
/// session's full notification snapshot taken after the handler finished.
///
/// Status and headers of the inner response are kept; only the body and its
/// content headers change. Must run inside [`super::session_middleware`].
pub async fn envelope_middleware(request: Request, next: Next) -> Response {
    let Some(notifications) = request.extensions().get::<NotificationService>().cloned()
    else {
        error!("envelope middleware ran without a session");
        return next.run(request).await;
    };

    let response = next.run(request).await;
    let (mut parts, body) = response.into_parts();

    let bytes = match to_bytes(body, MAX_WRAPPED_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            error!(error = %err, "failed to buffer response body");
            return AppError::internal("Failed to read response body").into_response();
        }
    };

    let messages = match notifications.snapshot().await {
        Ok(messages) => messages,
        Err(err) => {
            error!(error = %err, session = %notifications.session_id(), "failed to read notifications");
            return AppError::from(err).into_response();
        }
    };

    let envelope = ResponseEnvelope::new(payload_from_body(&parts.headers, &bytes), messages);
    let body = match serde_json::to_vec(&envelope) {
        Ok(body) => body,
        Err(err) => {
            error!(error = %err, "failed to encode response envelope");
            return AppError::internal("Failed to encode response").into_response();
        }
    };

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    Response::from_parts(parts, Body::from(body))
}

/// JSON bodies are embedded as values, anything else as text. An empty
/// body has no payload.
fn payload_from_body(headers: &HeaderMap, bytes: &Bytes) -> Option<Value> {
    if bytes.is_empty() {
        return None;
    }

    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("json"));

    if is_json && let Ok(value) = serde_json::from_slice(bytes) {
        return Some(value);
    }

    Some(Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
