use crate::backend::BackendClient;
use crate::storage::AppStorage;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    /// Application history, profile, résumé cache and preferences.
    pub storage: AppStorage,
}
