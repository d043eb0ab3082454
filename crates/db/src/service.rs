//! Shared personalization service
//!
//! Wraps the single-owner [`PersonalizationContext`] in a mutex so that
//! append, recompute and persist run as one critical section.

use std::sync::Arc;

use geolens_core::catalog::CountryFeatures;
use geolens_core::context::PersonalizationContext;
use geolens_core::insights::SmartInsights;
use geolens_core::interactions::Interaction;
use geolens_core::preferences::{PreferenceUpdate, UserPreferences};
use geolens_core::recommendations::{Recommendation, DEFAULT_LIMIT};
use geolens_core::stats::InteractionStats;
use tokio::sync::Mutex;
use tracing::info;

use crate::persistence::PersonalizationStore;
use crate::repositories::{InMemoryKeyValueRepository, SqlKeyValueRepository};
use crate::DbPool;

pub struct PersonalizationService {
    context: Mutex<PersonalizationContext>,
    store: PersonalizationStore,
    default_limit: usize,
}

impl PersonalizationService {
    /// Build a service and restore whatever the store holds
    pub async fn restore(store: PersonalizationStore, default_limit: usize) -> Self {
        let mut context = PersonalizationContext::new();
        if let Some(state) = store.load().await {
            context.restore(state);
        }

        info!(
            event_name = "personalization.service.ready",
            key = store.key(),
            interactions = context.log().len(),
            "personalization service ready"
        );

        Self { context: Mutex::new(context), store, default_limit }
    }

    pub async fn with_pool(pool: DbPool, key: &str, default_limit: usize) -> Self {
        let store = PersonalizationStore::new(Arc::new(SqlKeyValueRepository::new(pool)), key);
        Self::restore(store, default_limit).await
    }

    /// Service backed by process memory only
    pub async fn in_memory() -> Self {
        let store = PersonalizationStore::new(
            Arc::new(InMemoryKeyValueRepository::default()),
            geolens_core::persistence::DEFAULT_STORAGE_KEY,
        );
        Self::restore(store, DEFAULT_LIMIT).await
    }

    pub fn store(&self) -> &PersonalizationStore {
        &self.store
    }

    /// Record an interaction, recompute the profile and persist
    pub async fn track_interaction(&self, interaction: Interaction) -> Interaction {
        let mut context = self.context.lock().await;
        let recorded = context.record(interaction);
        self.store.save(&context.snapshot()).await;
        recorded
    }

    pub async fn update_preference(&self, update: PreferenceUpdate) -> UserPreferences {
        let mut context = self.context.lock().await;
        let preferences = context.update_preference(update).clone();
        self.store.save(&context.snapshot()).await;
        preferences
    }

    pub async fn reset(&self) {
        let mut context = self.context.lock().await;
        context.reset();
        self.store.clear().await;
    }

    /// Recommendations; `limit` falls back to the configured default
    pub async fn recommendations(
        &self,
        exclude: &[String],
        limit: Option<usize>,
    ) -> Vec<Recommendation> {
        let context = self.context.lock().await;
        context.generate_recommendations(exclude, limit.unwrap_or(self.default_limit))
    }

    pub async fn is_personalized(&self) -> bool {
        self.context.lock().await.is_personalized()
    }

    pub async fn insights(&self, country_name: &str) -> SmartInsights {
        self.context.lock().await.generate_smart_insights(country_name)
    }

    pub async fn stats(&self) -> InteractionStats {
        self.context.lock().await.stats()
    }

    pub async fn preferences(&self) -> Option<UserPreferences> {
        self.context.lock().await.preferences().cloned()
    }

    pub async fn catalog(&self) -> Vec<CountryFeatures> {
        self.context.lock().await.catalog().iter().cloned().collect()
    }
}
