//! Application history and storage-wide actions.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::application::{ApplicationHistory, ApplicationStatus};
use crate::models::job::JobMatch;
use crate::state::AppState;
use crate::views::ApplicationRow;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub job: JobMatch,
    #[serde(default)]
    pub cover_letter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
}

/// GET /applications
pub async fn handle_list(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    let now = Utc::now();
    let rows = state
        .storage
        .application_history()
        .await?
        .into_iter()
        .map(|record| ApplicationRow::from_record(record, now))
        .collect();
    Ok(Json(rows))
}

/// POST /applications
///
/// Records one "apply" action. Every call creates a new record, even for a job
/// that was applied to before.
pub async fn handle_apply(
    State(state): State<AppState>,
    Json(request): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplicationHistory>), AppError> {
    if request.job.job_link.trim().is_empty() {
        return Err(AppError::Validation("job_link cannot be empty".to_string()));
    }

    let record = ApplicationHistory::from_job(&request.job, request.cover_letter, Utc::now());
    state.storage.save_application(record.clone()).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PATCH /applications/:id/status
/// Unknown ids are a no-op, like every other history mutation.
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Result<StatusCode, AppError> {
    let found = state
        .storage
        .update_application_status(&id, update.status)
        .await?;
    if !found {
        debug!("Status update for unknown application {id}");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /applications/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.storage.delete_application(&id).await? {
        info!("Deleted application {id}");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /storage
pub async fn handle_clear(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.storage.clear_all_data().await?;
    Ok(StatusCode::NO_CONTENT)
}
