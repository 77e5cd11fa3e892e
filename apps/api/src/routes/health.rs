use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Reports our own liveness plus a best-effort probe of the backend.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let backend_healthy = state.backend.probe_health().await;

    Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "backend": {
            "url": state.backend.base_url(),
            "healthy": backend_healthy
        }
    }))
}
