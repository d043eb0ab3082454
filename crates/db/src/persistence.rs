//! Persistence adapter for the personalization record
//!
//! Reads and writes one JSON record under a fixed key. The `try_*` methods surface
//! failures; the plain methods log them and degrade to "no persisted state".

use std::sync::Arc;

use geolens_core::errors::ApplicationError;
use geolens_core::persistence::PersistedState;
use tracing::warn;

use crate::repositories::{KeyValueRepository, RepositoryError};

#[derive(Clone)]
pub struct PersonalizationStore {
    repository: Arc<dyn KeyValueRepository>,
    key: String,
}

impl PersonalizationStore {
    pub fn new(repository: Arc<dyn KeyValueRepository>, key: impl Into<String>) -> Self {
        Self { repository, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn try_load(&self) -> Result<Option<PersistedState>, ApplicationError> {
        let raw = self.repository.get(&self.key).await.map_err(persistence_error)?;
        raw.map(|raw| PersistedState::decode(&raw)).transpose()
    }

    pub async fn try_save(&self, state: &PersistedState) -> Result<(), ApplicationError> {
        let encoded = state.encode()?;
        self.repository.put(&self.key, &encoded).await.map_err(persistence_error)
    }

    pub async fn try_clear(&self) -> Result<bool, ApplicationError> {
        self.repository.delete(&self.key).await.map_err(persistence_error)
    }

    /// Missing or unreadable state loads as `None`
    pub async fn load(&self) -> Option<PersistedState> {
        match self.try_load().await {
            Ok(state) => state,
            Err(error) => {
                warn!(
                    event_name = "persistence.load_failed",
                    key = %self.key,
                    error = %error,
                    "failed to load personalization state; starting empty"
                );
                None
            }
        }
    }

    pub async fn save(&self, state: &PersistedState) {
        if let Err(error) = self.try_save(state).await {
            warn!(
                event_name = "persistence.save_failed",
                key = %self.key,
                error = %error,
                "failed to save personalization state"
            );
        }
    }

    pub async fn clear(&self) {
        if let Err(error) = self.try_clear().await {
            warn!(
                event_name = "persistence.clear_failed",
                key = %self.key,
                error = %error,
                "failed to clear personalization state"
            );
        }
    }
}

fn persistence_error(error: RepositoryError) -> ApplicationError {
    ApplicationError::Persistence(error.to_string())
}
