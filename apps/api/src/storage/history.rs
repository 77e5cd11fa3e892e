use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::models::application::{
    ApplicationHistory, ApplicationStatus, LastResume, Preferences, UserProfile,
};
use crate::storage::{KeyValueStore, StoreError};

pub const APPLICATIONS_KEY: &str = "job-app-history";
pub const USER_PROFILE_KEY: &str = "user-profile";
pub const LAST_RESUME_KEY: &str = "last-resume";
pub const PREFERENCES_KEY: &str = "app-preferences";

pub const ALL_KEYS: [&str; 4] = [
    APPLICATIONS_KEY,
    USER_PROFILE_KEY,
    LAST_RESUME_KEY,
    PREFERENCES_KEY,
];

/// Typed access to the four storage keys.
///
/// History mutations are read-modify-write of the whole list. They are serialised
/// inside this process; separate processes sharing one store still race, and the
/// last completed write wins.
#[derive(Clone)]
pub struct AppStorage {
    store: Arc<dyn KeyValueStore>,
    history_lock: Arc<Mutex<()>>,
}

impl AppStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            history_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Reads and decodes a key. Absent and unparseable values both come back as `None`.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Ignoring unparseable value under '{key}': {e}");
                Ok(None)
            }
        }
    }

    async fn write_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(value)?;
        self.store.set(key, encoded).await
    }

    async fn load_history(&self) -> Result<Vec<ApplicationHistory>, StoreError> {
        Ok(self.read_json(APPLICATIONS_KEY).await?.unwrap_or_default())
    }

    // ── Application history ────────────────────────────────────────────────

    /// Inserts `application` at the head of the list.
    pub async fn save_application(
        &self,
        application: ApplicationHistory,
    ) -> Result<(), StoreError> {
        let _guard = self.history_lock.lock().await;
        let mut history = self.load_history().await?;
        info!("Recording application {}", application.id);
        history.insert(0, application);
        self.write_json(APPLICATIONS_KEY, &history).await
    }

    /// Most-recent-first list; empty when nothing (or nothing readable) is stored.
    pub async fn application_history(&self) -> Result<Vec<ApplicationHistory>, StoreError> {
        self.load_history().await
    }

    /// Sets the status of the record with `id`. Returns false (and writes nothing)
    /// when no record matches.
    pub async fn update_application_status(
        &self,
        id: &str,
        status: ApplicationStatus,
    ) -> Result<bool, StoreError> {
        let _guard = self.history_lock.lock().await;
        let mut history = self.load_history().await?;
        let Some(record) = history.iter_mut().find(|app| app.id == id) else {
            return Ok(false);
        };
        record.status = status;
        self.write_json(APPLICATIONS_KEY, &history).await?;
        Ok(true)
    }

    /// Removes the record with `id` and persists the remainder.
    /// Returns whether anything was removed.
    pub async fn delete_application(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.history_lock.lock().await;
        let mut history = self.load_history().await?;
        let before = history.len();
        history.retain(|app| app.id != id);
        self.write_json(APPLICATIONS_KEY, &history).await?;
        Ok(history.len() != before)
    }

    // ── Profile, résumé cache, preferences ─────────────────────────────────

    pub async fn save_user_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        self.write_json(USER_PROFILE_KEY, profile).await
    }

    pub async fn user_profile(&self) -> Result<Option<UserProfile>, StoreError> {
        self.read_json(USER_PROFILE_KEY).await
    }

    pub async fn save_last_resume(&self, resume: &LastResume) -> Result<(), StoreError> {
        self.write_json(LAST_RESUME_KEY, resume).await
    }

    pub async fn last_resume(&self) -> Result<Option<LastResume>, StoreError> {
        self.read_json(LAST_RESUME_KEY).await
    }

    pub async fn save_preferences(&self, preferences: &Preferences) -> Result<(), StoreError> {
        self.write_json(PREFERENCES_KEY, preferences).await
    }

    pub async fn preferences(&self) -> Result<Preferences, StoreError> {
        Ok(self.read_json(PREFERENCES_KEY).await?.unwrap_or_default())
    }

    /// Erases every known key.
    pub async fn clear_all_data(&self) -> Result<(), StoreError> {
        let _guard = self.history_lock.lock().await;
        for key in ALL_KEYS {
            self.store.remove(key).await?;
        }
        info!("Cleared all stored data");
        Ok(())
    }
}
