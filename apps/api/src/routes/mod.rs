pub mod applications;
pub mod health;
pub mod jobs;
pub mod profile;
pub mod resume;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};

use crate::backend::Relayed;
use crate::state::AppState;

/// Upload ceiling. Comfortably above the résumé limit so oversized files reach
/// the validator and get a readable rejection.
const UPLOAD_BODY_LIMIT: usize = 32 * 1024 * 1024;

/// Sends a backend answer back with the backend's own status and body.
pub fn relay_response(relayed: Relayed) -> Response {
    let status = StatusCode::from_u16(relayed.status).unwrap_or(StatusCode::OK);
    (status, Json(relayed.body)).into_response()
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Backend relays
        .route("/jobs/stats", get(jobs::handle_stats))
        .route("/resume/match", post(resume::handle_match))
        .route("/resume/parse", post(resume::handle_parse))
        // Local views and storage
        .route("/jobs/cards", post(jobs::handle_cards))
        .route("/jobs/detail", post(jobs::handle_detail))
        .route("/resume/last", get(resume::handle_last_resume))
        .route(
            "/applications",
            get(applications::handle_list).post(applications::handle_apply),
        )
        .route(
            "/applications/:id/status",
            patch(applications::handle_update_status),
        )
        .route("/applications/:id", delete(applications::handle_delete))
        .route(
            "/profile",
            get(profile::handle_get_profile).put(profile::handle_put_profile),
        )
        .route(
            "/preferences",
            get(profile::handle_get_preferences).put(profile::handle_put_preferences),
        )
        .route("/storage", delete(applications::handle_clear))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .with_state(state)
}
