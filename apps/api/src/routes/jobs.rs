use axum::{extract::State, response::Response, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::job::{JobMatch, MatchFilters, MatchResponse};
use crate::routes::relay_response;
use crate::state::AppState;
use crate::views::{build_cards, JobCard};

#[derive(Debug, Deserialize)]
pub struct CardsRequest {
    pub response: MatchResponse,
    #[serde(default)]
    pub filters: MatchFilters,
}

#[derive(Debug, Serialize)]
pub struct CardsResponse {
    pub total: usize,
    pub cards: Vec<JobCard>,
}

/// GET /jobs/stats
pub async fn handle_stats(State(state): State<AppState>) -> Result<Response, AppError> {
    let relayed = state.backend.stats().await?;
    Ok(relay_response(relayed))
}

/// POST /jobs/cards
///
/// Turns a match result set into display cards, applying the local
/// `min_similarity` and `sort_by` filters.
pub async fn handle_cards(Json(request): Json<CardsRequest>) -> Json<CardsResponse> {
    let cards = build_cards(&request.response, &request.filters, Utc::now());
    Json(CardsResponse {
        total: cards.len(),
        cards,
    })
}

/// POST /jobs/detail
pub async fn handle_detail(Json(job): Json<JobMatch>) -> Json<JobCard> {
    Json(JobCard::detail(&job, Utc::now()))
}
