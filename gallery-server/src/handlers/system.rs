use axum::{Json, extract::State, http::StatusCode};
use gallery_core::{SessionId, domain::notification::NOTIFICATION_SESSION_KEY};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::infra::app_state::AppState;

pub async fn ping_handler() -> Result<Json<Value>, StatusCode> {
    info!("Ping endpoint called");
    Ok(Json(json!({
        "status": "ok",
        "message": "Gallery server is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    })))
}

pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, StatusCode> {
    let mut health_status = json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    health_status["checks"]["image_store"] = json!({
        "status": "healthy",
        "type": if state.config().database_url.is_some() { "postgres" } else { "memory" },
        "storage_prefix": state.image_service.storage_prefix(),
    });

    // Session store reachability; a probe session that is never written
    match state
        .sessions
        .get(SessionId::new(), NOTIFICATION_SESSION_KEY)
        .await
    {
        Ok(_) => {
            health_status["checks"]["session_store"] = json!({
                "status": "healthy",
                "type": if state.config().redis_url.is_some() { "redis" } else { "memory" },
            });
            Ok(Json(health_status))
        }
        Err(e) => {
            warn!(error = %e, "session store health check failed");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
