use serde::{Deserialize, Serialize};

/// A backend-scored job listing. Read-only: lives for one result set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobMatch {
    pub job_link: String,
    pub company_name: String,
    pub job_title: String,
    pub location: String,
    pub first_published: String,
    pub similarity_score: f64,
    pub chunk_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_experience_years: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeProcessingInfo {
    pub original_length: u64,
    pub enhanced_length: u64,
    pub enhancement_used: bool,
    pub parsing_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhancement_method: Option<String>,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationInfo {
    pub models_used: Vec<String>,
    pub jobs_evaluated: u64,
    pub false_positives_removed: u64,
    pub schema_enforced: bool,
}

/// Body of a successful `/resume/match` call, as the backend shapes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub matches: Vec<JobMatch>,
    pub total_matches: u64,
    pub resume_processing: ResumeProcessingInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_experience: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_info: Option<ValidationInfo>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Similarity,
    Date,
}

/// The search filter form. Text fields are forwarded to the backend as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchFilters {
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub user_experience: Option<String>,
    /// Applied locally when building job cards; never sent to the backend.
    #[serde(default)]
    pub min_similarity: Option<f64>,
}

impl MatchFilters {
    /// Field names accepted from the inbound form and relayed upstream.
    pub const FORM_FIELDS: [&'static str; 6] = [
        "keywords",
        "location",
        "start_date",
        "end_date",
        "sort_by",
        "user_experience",
    ];

    /// Stores a form value under its field name. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: String) {
        let slot = match name {
            "keywords" => &mut self.keywords,
            "location" => &mut self.location,
            "start_date" => &mut self.start_date,
            "end_date" => &mut self.end_date,
            "sort_by" => &mut self.sort_by,
            "user_experience" => &mut self.user_experience,
            _ => return,
        };
        *slot = Some(value);
    }

    /// Non-empty relay fields in form order.
    pub fn form_fields(&self) -> Vec<(&'static str, &str)> {
        let values = [
            &self.keywords,
            &self.location,
            &self.start_date,
            &self.end_date,
            &self.sort_by,
            &self.user_experience,
        ];
        Self::FORM_FIELDS
            .iter()
            .zip(values)
            .filter_map(|(name, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| (*name, v))
            })
            .collect()
    }

    pub fn sort_order(&self) -> SortBy {
        match self.sort_by.as_deref() {
            Some("date") => SortBy::Date,
            _ => SortBy::Similarity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_fields_skip_empty_values() {
        let mut filters = MatchFilters::default();
        filters.set_field("location", "Berlin".to_string());
        filters.set_field("keywords", String::new());
        filters.set_field("sort_by", "date".to_string());
        filters.set_field("bogus", "ignored".to_string());

        assert_eq!(
            filters.form_fields(),
            vec![("location", "Berlin"), ("sort_by", "date")]
        );
        assert_eq!(filters.sort_order(), SortBy::Date);
    }

    #[test]
    fn test_sort_order_defaults_to_similarity() {
        let filters = MatchFilters {
            sort_by: Some("relevance".to_string()),
            ..Default::default()
        };
        assert_eq!(filters.sort_order(), SortBy::Similarity);
    }

    #[test]
    fn test_match_response_optional_fields() {
        let body = json!({
            "matches": [{
                "job_link": "https://jobs.example.com/1",
                "company_name": "Acme",
                "job_title": "Rust Engineer",
                "location": "Remote",
                "first_published": "2024-03-01T00:00:00Z",
                "similarity_score": 0.91,
                "chunk_text": "Build services."
            }],
            "total_matches": 1,
            "resume_processing": {
                "original_length": 1200,
                "enhanced_length": 1500,
                "enhancement_used": true,
                "parsing_method": "pdfplumber",
                "filename": "cv.pdf"
            }
        });

        let parsed: MatchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.matches.len(), 1);
        assert!(parsed.matches[0].min_experience_years.is_none());
        assert!(parsed.extracted_skills.is_none());
        assert!(parsed.validation_info.is_none());
    }
}
