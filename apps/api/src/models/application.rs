use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::job::JobMatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Applied,
    Rejected,
    Interviewing,
}

impl ApplicationStatus {
    /// CSS classes for the status badge on a history row.
    pub fn badge_class(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "bg-green-50 text-green-700 border-green-200",
            ApplicationStatus::Rejected => "bg-red-50 text-red-700 border-red-200",
            ApplicationStatus::Interviewing => "bg-blue-50 text-blue-700 border-blue-200",
            ApplicationStatus::Pending => "bg-yellow-50 text-yellow-700 border-yellow-200",
        }
    }
}

/// One user-initiated "apply" action, persisted in the local store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationHistory {
    pub id: String,
    pub job_link: String,
    pub company_name: String,
    pub job_title: String,
    pub applied_at: String,
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
}

impl ApplicationHistory {
    /// New pending record for `job`. The id combines the job link with the
    /// creation time in milliseconds.
    pub fn from_job(job: &JobMatch, cover_letter: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("{}-{}", job.job_link, now.timestamp_millis()),
            job_link: job.job_link.clone(),
            company_name: job.company_name.clone(),
            job_title: job.job_title.clone(),
            applied_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            status: ApplicationStatus::Pending,
            cover_letter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_locations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<f64>,
}

/// Metadata of the most recently submitted résumé.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastResume {
    pub filename: String,
    pub uploaded_at: String,
}

/// Free-form preferences. Known keys are typed; anything else round-trips in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_apply: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_status_badge_classes() {
        assert!(ApplicationStatus::Applied.badge_class().contains("green"));
        assert!(ApplicationStatus::Rejected.badge_class().contains("red"));
        assert!(ApplicationStatus::Interviewing.badge_class().contains("blue"));
        assert_eq!(
            ApplicationStatus::Pending.badge_class(),
            "bg-yellow-50 text-yellow-700 border-yellow-200"
        );
    }

    fn job() -> JobMatch {
        JobMatch {
            job_link: "https://jobs.example.com/42".to_string(),
            company_name: "Acme".to_string(),
            job_title: "Backend Engineer".to_string(),
            location: "Remote".to_string(),
            first_published: "2024-01-01T00:00:00Z".to_string(),
            similarity_score: 0.7,
            chunk_text: "Ship things.".to_string(),
            min_experience_years: None,
            experience_details: None,
        }
    }

    #[test]
    fn test_from_job_builds_pending_record() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let record = ApplicationHistory::from_job(&job(), None, now);

        assert_eq!(
            record.id,
            format!("https://jobs.example.com/42-{}", now.timestamp_millis())
        );
        assert_eq!(record.status, ApplicationStatus::Pending);
        assert_eq!(record.applied_at, "2024-05-01T12:00:00.000Z");
        assert_eq!(record.company_name, "Acme");
    }

    #[test]
    fn test_record_uses_camel_case_keys() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let record = ApplicationHistory::from_job(&job(), Some("Hi".to_string()), now);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["jobLink"], "https://jobs.example.com/42");
        assert_eq!(value["appliedAt"], "2024-05-01T12:00:00.000Z");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["coverLetter"], "Hi");
    }

    #[test]
    fn test_preferences_keep_unknown_keys() {
        let prefs: Preferences =
            serde_json::from_value(json!({ "autoApply": true, "theme": "dark" })).unwrap();
        assert_eq!(prefs.auto_apply, Some(true));

        let back = serde_json::to_value(&prefs).unwrap();
        assert_eq!(back, json!({ "autoApply": true, "theme": "dark" }));
    }
}
