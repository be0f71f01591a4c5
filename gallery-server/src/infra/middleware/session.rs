use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::Response,
};
use gallery_core::SessionId;
use tracing::{debug, warn};

use crate::infra::app_state::AppState;

pub const SESSION_COOKIE: &str = "GALLERY_SESSION";

pub fn create_session_cookie(session_id: SessionId) -> String {
    format!("{SESSION_COOKIE}={session_id}; HttpOnly; SameSite=Lax; Path=/")
}

pub fn extract_session_from_cookies(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .find_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            if name == SESSION_COOKIE {
                value.parse().ok()
            } else {
                None
            }
        })
}

/// Bind every request to a session and hand the matching notification
/// channel to the handlers through request extensions.
///
/// Requests without a valid session cookie start a new session, announced
/// through `Set-Cookie` on the response.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let existing = extract_session_from_cookies(request.headers());
    let session_id = existing.unwrap_or_default();

    if existing.is_none() {
        debug!(session = %session_id, "starting new session");
    }

    request
        .extensions_mut()
        .insert(state.notifications(session_id));

    let mut response = next.run(request).await;

    if existing.is_none() {
        match HeaderValue::from_str(&create_session_cookie(session_id)) {
            Ok(cookie) => {
                response.headers_mut().append(header::SET_COOKIE, cookie);
            }
            Err(err) => warn!(error = %err, "failed to encode session cookie"),
        }
    }

    response
}
