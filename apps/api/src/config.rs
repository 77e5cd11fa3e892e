use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_BACKEND_URL: &str = "https://jobboardaggregator-production.up.railway.app";

/// Application configuration loaded from environment variables.
/// Every variable has a default, so startup only fails on malformed values.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    /// Static bearer token forwarded to the backend. Never logged.
    pub backend_token: Option<String>,
    pub storage: StorageLocation,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            backend_url: normalize_base_url(
                &std::env::var("BACKEND_API_URL")
                    .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string()),
            ),
            backend_token: optional_env("BACKEND_API_TOKEN"),
            storage: StorageLocation::parse(
                &std::env::var("STORAGE_DIR").unwrap_or_else(|_| "./data".to_string()),
            ),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Where the key-value store lives. `STORAGE_DIR=:memory:` keeps it in-process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    Directory(PathBuf),
    Memory,
}

impl StorageLocation {
    fn parse(value: &str) -> Self {
        match value.trim() {
            ":memory:" => StorageLocation::Memory,
            dir => StorageLocation::Directory(PathBuf::from(dir)),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
