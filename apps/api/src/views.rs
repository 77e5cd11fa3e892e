//! Display-ready projections of backend matches and stored applications.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::format::{
    calculate_similarity_percentage, format_date, format_relative_time, parse_timestamp,
    truncate_text, SimilarityTier,
};
use crate::models::application::ApplicationHistory;
use crate::models::job::{JobMatch, MatchFilters, MatchResponse, SortBy};

const CARD_EXCERPT_LEN: usize = 200;

#[derive(Debug, Clone, Serialize)]
pub struct JobCard {
    pub job_link: String,
    pub job_title: String,
    pub company_name: String,
    pub location: String,
    pub posted: String,
    pub match_percentage: String,
    pub tier: SimilarityTier,
    pub color_class: &'static str,
    pub excerpt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_experience_years: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_details: Option<String>,
}

impl JobCard {
    pub fn from_match(job: &JobMatch, now: DateTime<Utc>) -> Self {
        Self::build(job, now, truncate_text(&job.chunk_text, CARD_EXCERPT_LEN))
    }

    /// The expanded detail view: same fields, untruncated description.
    pub fn detail(job: &JobMatch, now: DateTime<Utc>) -> Self {
        Self::build(job, now, job.chunk_text.clone())
    }

    fn build(job: &JobMatch, now: DateTime<Utc>, excerpt: String) -> Self {
        let tier = SimilarityTier::from_score(job.similarity_score);
        Self {
            job_link: job.job_link.clone(),
            job_title: job.job_title.clone(),
            company_name: job.company_name.clone(),
            location: job.location.clone(),
            posted: format_relative_time(&job.first_published, now),
            match_percentage: calculate_similarity_percentage(job.similarity_score),
            tier,
            color_class: tier.color_class(),
            excerpt,
            min_experience_years: job.min_experience_years,
            experience_details: job.experience_details.clone(),
        }
    }
}

/// Drops matches under `min_similarity` and orders the rest for display.
/// Similarity sorts best-first; date sorts newest-first with unparseable dates last.
pub fn build_cards(
    response: &MatchResponse,
    filters: &MatchFilters,
    now: DateTime<Utc>,
) -> Vec<JobCard> {
    let threshold = filters.min_similarity.unwrap_or(0.0);
    let mut jobs: Vec<&JobMatch> = response
        .matches
        .iter()
        .filter(|job| job.similarity_score >= threshold)
        .collect();

    match filters.sort_order() {
        SortBy::Similarity => jobs.sort_by(|a, b| {
            b.similarity_score
                .partial_cmp(&a.similarity_score)
                .unwrap_or(Ordering::Equal)
        }),
        SortBy::Date => {
            jobs.sort_by_key(|job| std::cmp::Reverse(parse_timestamp(&job.first_published)))
        }
    }

    jobs.into_iter()
        .map(|job| JobCard::from_match(job, now))
        .collect()
}

/// A history entry with display dates attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRow {
    #[serde(flatten)]
    pub record: ApplicationHistory,
    pub applied_relative: String,
    pub applied_date: String,
    pub status_class: &'static str,
}

impl ApplicationRow {
    pub fn from_record(record: ApplicationHistory, now: DateTime<Utc>) -> Self {
        Self {
            applied_relative: format_relative_time(&record.applied_at, now),
            applied_date: format_date(&record.applied_at),
            status_class: record.status.badge_class(),
            record,
        }
    }
}
