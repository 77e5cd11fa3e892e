//! Résumé upload relays.

use axum::{
    extract::{Multipart, State},
    response::Response,
    Json,
};
use chrono::{SecondsFormat, Utc};
use tracing::{info, warn};

use crate::backend::ResumeUpload;
use crate::errors::AppError;
use crate::format::validate_resume_file;
use crate::models::application::LastResume;
use crate::models::job::MatchFilters;
use crate::routes::relay_response;
use crate::state::AppState;

/// POST /resume/match
///
/// Forwards the résumé and any filter fields to the backend matcher and relays
/// its answer. A successful match also records the last-résumé metadata.
pub async fn handle_match(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let (upload, filters) = read_resume_form(multipart).await?;
    info!(
        "Matching resume '{}' ({} bytes)",
        upload.filename,
        upload.bytes.len()
    );

    let relayed = state.backend.match_resume(&upload, &filters).await?;

    if let Some(total) = relayed.body.get("total_matches").and_then(|v| v.as_u64()) {
        info!("Backend returned {total} matches");
    }

    let last = LastResume {
        filename: upload.filename.clone(),
        uploaded_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    if let Err(e) = state.storage.save_last_resume(&last).await {
        warn!("Could not record last resume: {e}");
    }

    Ok(relay_response(relayed))
}

/// POST /resume/parse
pub async fn handle_parse(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let (upload, _) = read_resume_form(multipart).await?;
    info!("Parsing resume '{}'", upload.filename);

    let relayed = state.backend.parse_resume(&upload).await?;
    Ok(relay_response(relayed))
}

/// GET /resume/last
pub async fn handle_last_resume(
    State(state): State<AppState>,
) -> Result<Json<Option<LastResume>>, AppError> {
    Ok(Json(state.storage.last_resume().await?))
}

/// Pulls the `file` part and the known filter fields out of the form.
/// The file must be present and pass the résumé type/size check.
async fn read_resume_form(
    mut multipart: Multipart,
) -> Result<(ResumeUpload, MatchFilters), AppError> {
    let mut upload = None;
    let mut filters = MatchFilters::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "file" {
            // A plain text field named `file` is not an upload.
            let Some(filename) = field.file_name().map(str::to_string) else {
                continue;
            };
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(malformed)?;
            // Browsers send an empty, unnamed file part when nothing was chosen.
            if filename.is_empty() && bytes.is_empty() {
                continue;
            }
            upload = Some(ResumeUpload {
                filename,
                content_type,
                bytes,
            });
        } else if MatchFilters::FORM_FIELDS.contains(&name.as_str()) {
            let value = field.text().await.map_err(malformed)?;
            filters.set_field(&name, value);
        }
    }

    let upload = upload.ok_or(AppError::MissingFile)?;
    validate_resume_file(&upload.filename, upload.bytes.len() as u64)
        .map_err(AppError::Validation)?;

    Ok((upload, filters))
}

fn malformed(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Malformed multipart body: {e}"))
}
