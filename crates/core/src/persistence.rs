//! Persisted personalization record
//!
//! The storage backend is owned by the db crate; this module only defines the record and
//! its JSON encoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ApplicationError;
use crate::interactions::{validate_rating, Interaction};
use crate::preferences::UserPreferences;

/// Only the most recent interactions are written to storage
pub const PERSISTED_INTERACTIONS: usize = 100;

/// Storage key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "geolens.personalization";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub interactions: Vec<Interaction>,
    pub preferences: Option<UserPreferences>,
    pub timestamp: DateTime<Utc>,
}

impl PersistedState {
    pub fn encode(&self) -> Result<String, ApplicationError> {
        serde_json::to_string(self)
            .map_err(|error| ApplicationError::Persistence(format!("encode failed: {error}")))
    }

    /// Decode a stored record. Interactions carrying an out-of-range rating are dropped,
    /// and so is a profile that fails [`UserPreferences::validate`].
    pub fn decode(raw: &str) -> Result<Self, ApplicationError> {
        let mut state: Self = serde_json::from_str(raw)
            .map_err(|error| ApplicationError::Persistence(format!("decode failed: {error}")))?;

        state.interactions.retain(|interaction| {
            interaction.rating.map_or(true, |rating| validate_rating(rating).is_ok())
        });
        if state.preferences.as_ref().is_some_and(|preferences| preferences.validate().is_err()) {
            state.preferences = None;
        }
        Ok(state)
    }
}
