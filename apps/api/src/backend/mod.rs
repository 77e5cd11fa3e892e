//! Backend client: the only place that talks to the job-matching backend.
//!
//! Every call is a single pass-through attempt with no retries, timeout or caching.
//! The backend's JSON body and status are handed back untouched so route handlers
//! can relay them verbatim.

use bytes::Bytes;
use reqwest::{
    header::CONTENT_TYPE,
    multipart::{Form, Part},
    Client, RequestBuilder,
};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::job::MatchFilters;

/// Message used when the backend fails without saying why.
pub const FALLBACK_ERROR_MESSAGE: &str = "Backend request failed";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// A successful backend answer.
#[derive(Debug, Clone)]
pub struct Relayed {
    pub status: u16,
    pub body: Value,
}

/// A résumé file received from the client, ready to be forwarded.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ResumeUpload {
    fn to_part(&self) -> Part {
        let part = || Part::bytes(self.bytes.to_vec()).file_name(self.filename.clone());
        // A malformed client content type is dropped rather than failing the relay.
        match self.content_type.as_deref().map(|ct| part().mime_str(ct)) {
            Some(Ok(with_mime)) => with_mime,
            _ => part(),
        }
    }
}

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl BackendClient {
    pub fn new(base_url: String, token: Option<String>) -> Result<Self, BackendError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url,
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Best-effort reachability probe. Any failure counts as unhealthy.
    pub async fn probe_health(&self) -> bool {
        match self.authorize(self.client.get(self.url("/health"))).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Backend health probe failed: {e}");
                false
            }
        }
    }

    /// GET /server/stats
    pub async fn stats(&self) -> Result<Relayed, BackendError> {
        let request = self
            .client
            .get(self.url("/server/stats"))
            .header(CONTENT_TYPE, "application/json");
        self.relay(request).await
    }

    /// POST /server/match-resume-upload
    pub async fn match_resume(
        &self,
        upload: &ResumeUpload,
        filters: &MatchFilters,
    ) -> Result<Relayed, BackendError> {
        let mut form = Form::new().part("file", upload.to_part());
        for (name, value) in filters.form_fields() {
            form = form.text(name, value.to_string());
        }
        let request = self
            .client
            .post(self.url("/server/match-resume-upload"))
            .multipart(form);
        self.relay(request).await
    }

    /// POST /server/parse-resume
    pub async fn parse_resume(&self, upload: &ResumeUpload) -> Result<Relayed, BackendError> {
        let form = Form::new().part("file", upload.to_part());
        let request = self
            .client
            .post(self.url("/server/parse-resume"))
            .multipart(form);
        self.relay(request).await
    }

    async fn relay(&self, request: RequestBuilder) -> Result<Relayed, BackendError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        let body: Value = response.json().await?;
        debug!("Backend answered {status}");
        Ok(Relayed {
            status: status.as_u16(),
            body,
        })
    }
}

/// Pulls the backend's own message out of an error body.
/// Accepts `{"error": "..."}` and FastAPI-style `{"detail": "..."}`.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["error", "detail"]
                .iter()
                .find_map(|key| v.get(*key).and_then(Value::as_str).map(String::from))
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_backend;
    use axum::{http::HeaderMap, routing::get, Json, Router};
    use serde_json::json;

    #[test]
    fn test_error_message_from_error_field() {
        assert_eq!(
            extract_error_message(r#"{"error": "quota exceeded"}"#),
            "quota exceeded"
        );
    }

    #[test]
    fn test_error_message_from_detail_field() {
        assert_eq!(
            extract_error_message(r#"{"detail": "Unsupported file"}"#),
            "Unsupported file"
        );
    }

    #[test]
    fn test_error_message_fallback_for_non_json() {
        assert_eq!(
            extract_error_message("<html>Bad Gateway</html>"),
            FALLBACK_ERROR_MESSAGE
        );
        assert_eq!(extract_error_message(""), FALLBACK_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_bearer_token_attached_when_configured() {
        let app = Router::new().route(
            "/server/stats",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                Json(json!({ "auth": auth }))
            }),
        );
        let base = spawn_backend(app).await;

        let with_token = BackendClient::new(base.clone(), Some("s3cret".to_string())).unwrap();
        let relayed = with_token.stats().await.unwrap();
        assert_eq!(relayed.status, 200);
        assert_eq!(relayed.body["auth"], "Bearer s3cret");

        let without = BackendClient::new(base, None).unwrap();
        let relayed = without.stats().await.unwrap();
        assert_eq!(relayed.body["auth"], "");
    }

    #[tokio::test]
    async fn test_probe_health_false_when_unreachable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = BackendClient::new(format!("http://{addr}"), None).unwrap();
        assert!(!client.probe_health().await);
    }
}
