use axum::{extract::State, http::StatusCode, Json};

use crate::errors::AppError;
use crate::format::{validate_email, validate_phone};
use crate::models::application::{Preferences, UserProfile};
use crate::state::AppState;

/// GET /profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
) -> Result<Json<Option<UserProfile>>, AppError> {
    Ok(Json(state.storage.user_profile().await?))
}

/// PUT /profile
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Json(profile): Json<UserProfile>,
) -> Result<StatusCode, AppError> {
    if !validate_email(&profile.email) {
        return Err(AppError::Validation(format!(
            "'{}' is not a valid email address",
            profile.email
        )));
    }
    if let Some(phone) = profile.phone.as_deref().filter(|p| !p.is_empty()) {
        if !validate_phone(phone) {
            return Err(AppError::Validation(format!(
                "'{phone}' is not a valid phone number"
            )));
        }
    }

    state.storage.save_user_profile(&profile).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /preferences
pub async fn handle_get_preferences(
    State(state): State<AppState>,
) -> Result<Json<Preferences>, AppError> {
    Ok(Json(state.storage.preferences().await?))
}

/// PUT /preferences
pub async fn handle_put_preferences(
    State(state): State<AppState>,
    Json(preferences): Json<Preferences>,
) -> Result<StatusCode, AppError> {
    state.storage.save_preferences(&preferences).await?;
    Ok(StatusCode::NO_CONTENT)
}
