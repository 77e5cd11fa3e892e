#![allow(dead_code)]

//! Pure formatting and validation helpers. Nothing here reads the clock:
//! callers pass `now` explicitly.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde::Serialize;

pub const RESUME_EXTENSIONS: [&str; 4] = ["pdf", "doc", "docx", "txt"];
pub const MAX_RESUME_BYTES: u64 = 15 * 1024 * 1024;
pub const DEFAULT_TRUNCATE_LEN: usize = 150;

const MS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.f]` (read as UTC) or a bare date.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `"Mar 5, 2024"`. Unparseable input is returned unchanged.
pub fn format_date(value: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => value.to_string(),
    }
}

/// Buckets the age of `value` relative to `now` using whole elapsed days.
pub fn format_relative_time(value: &str, now: DateTime<Utc>) -> String {
    let Some(then) = parse_timestamp(value) else {
        return value.to_string();
    };
    let days = (now - then).num_milliseconds().div_euclid(MS_PER_DAY);

    match days {
        d if d <= 0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        d if d < 7 => format!("{d} days ago"),
        d if d < 30 => format!("{} weeks ago", d / 7),
        d if d < 365 => format!("{} months ago", d / 30),
        d => format!("{} years ago", d / 365),
    }
}

/// `0.873` → `"87%"`.
pub fn calculate_similarity_percentage(score: f64) -> String {
    format!("{}%", (score * 100.0).round() as i64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityTier {
    Excellent,
    Good,
    Fair,
    Low,
}

impl SimilarityTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            SimilarityTier::Excellent
        } else if score >= 0.6 {
            SimilarityTier::Good
        } else if score >= 0.4 {
            SimilarityTier::Fair
        } else {
            SimilarityTier::Low
        }
    }

    pub fn color_class(self) -> &'static str {
        match self {
            SimilarityTier::Excellent => "text-green-600 bg-green-50",
            SimilarityTier::Good => "text-blue-600 bg-blue-50",
            SimilarityTier::Fair => "text-yellow-600 bg-yellow-50",
            SimilarityTier::Low => "text-gray-600 bg-gray-50",
        }
    }
}

pub fn get_similarity_color(score: f64) -> &'static str {
    SimilarityTier::from_score(score).color_class()
}

/// Cuts `text` to `max_len` characters and appends `...` when it was longer.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_len).collect();
    format!("{}...", cut.trim())
}

/// Lowercased text after the last `.`; empty when there is no dot.
pub fn file_extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

pub fn is_valid_resume_file(filename: &str, size: u64) -> bool {
    validate_resume_file(filename, size).is_ok()
}

/// Same check as [`is_valid_resume_file`] with a user-facing reason on failure.
pub fn validate_resume_file(filename: &str, size: u64) -> Result<(), String> {
    let extension = file_extension(filename);
    if !RESUME_EXTENSIONS.contains(&extension.as_str()) {
        return Err(format!(
            "Unsupported file type '{filename}'. Allowed: {}",
            RESUME_EXTENSIONS.join(", ")
        ));
    }
    if size > MAX_RESUME_BYTES {
        return Err(format!(
            "File is too large ({}). Maximum size is {}",
            format_file_size(size),
            format_file_size(MAX_RESUME_BYTES)
        ));
    }
    Ok(())
}

/// Base-1024 size with two-decimal rounding: `1536` → `"1.5 KB"`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["Bytes", "KB", "MB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let bytes = bytes as f64;
    let exponent = ((bytes.ln() / 1024_f64.ln()).floor() as usize).min(UNITS.len() - 1);
    let value = (bytes / 1024_f64.powi(exponent as i32) * 100.0).round() / 100.0;
    format!("{value} {}", UNITS[exponent])
}

pub fn validate_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
        .is_match(email)
}

pub fn validate_phone(phone: &str) -> bool {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE
        .get_or_init(|| Regex::new(r"^[\d\s\-+()]{10,}$").expect("valid phone regex"))
        .is_match(phone)
}
