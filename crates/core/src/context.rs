//! Personalization context
//!
//! Single owner of the interaction log and the preference profile. Mutations go through
//! `&mut self`; persistence is the caller's job (see [`PersonalizationContext::snapshot`]).

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::catalog::FeatureCatalog;
use crate::insights::{generate_smart_insights, SmartInsights};
use crate::interactions::{Interaction, InteractionLog};
use crate::persistence::{PersistedState, PERSISTED_INTERACTIONS};
use crate::preferences::{infer_preferences, PreferenceUpdate, UserPreferences};
use crate::recommendations::{Recommendation, RecommendationEngine, RecommendationRequest};
use crate::stats::InteractionStats;

#[derive(Debug, Clone, Default)]
pub struct PersonalizationContext {
    catalog: FeatureCatalog,
    log: InteractionLog,
    preferences: Option<UserPreferences>,
    engine: RecommendationEngine,
}

impl PersonalizationContext {
    pub fn new() -> Self {
        Self::with_engine(RecommendationEngine::new())
    }

    pub fn with_engine(engine: RecommendationEngine) -> Self {
        Self {
            catalog: FeatureCatalog::new(),
            log: InteractionLog::new(),
            preferences: None,
            engine,
        }
    }

    pub fn catalog(&self) -> &FeatureCatalog {
        &self.catalog
    }

    pub fn log(&self) -> &InteractionLog {
        &self.log
    }

    pub fn preferences(&self) -> Option<&UserPreferences> {
        self.preferences.as_ref()
    }

    /// Record an interaction stamped with the current time
    pub fn record(&mut self, interaction: Interaction) -> Interaction {
        self.record_at(interaction, Utc::now())
    }

    /// Record an interaction stamped with `now`, then recompute the profile.
    /// Returns the interaction as stored.
    pub fn record_at(&mut self, interaction: Interaction, now: DateTime<Utc>) -> Interaction {
        let interaction = interaction.at(now);
        info!(
            event_name = "personalization.interaction.recorded",
            country = %interaction.country_name,
            action = %interaction.action,
            "recorded interaction"
        );

        self.log.push(interaction.clone());
        self.recompute(now);
        interaction
    }

    /// Apply a manual preference edit, creating the default profile first if needed
    pub fn update_preference(&mut self, update: PreferenceUpdate) -> &UserPreferences {
        self.update_preference_at(update, Utc::now())
    }

    pub fn update_preference_at(
        &mut self,
        update: PreferenceUpdate,
        now: DateTime<Utc>,
    ) -> &UserPreferences {
        let field = update.field_name();
        info!(event_name = "personalization.preference.updated", field, "updated preference");

        let preferences =
            self.preferences.get_or_insert_with(|| UserPreferences::manual_default(now));
        preferences.apply(update, now);
        preferences
    }

    pub fn generate_recommendations<I, S>(&self, exclude: I, limit: usize) -> Vec<Recommendation>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let request = RecommendationRequest::new().with_exclude(exclude).with_limit(limit);
        self.recommend(&request)
    }

    pub fn recommend(&self, request: &RecommendationRequest) -> Vec<Recommendation> {
        self.engine.recommend(&self.catalog, &self.log, self.preferences.as_ref(), request)
    }

    /// True once recommendations come from scoring rather than the popular list
    pub fn is_personalized(&self) -> bool {
        RecommendationEngine::is_personalized(&self.log, self.preferences.as_ref())
    }

    pub fn generate_smart_insights(&self, country_name: &str) -> SmartInsights {
        generate_smart_insights(&self.catalog, &self.log, self.preferences.as_ref(), country_name)
    }

    pub fn stats(&self) -> InteractionStats {
        InteractionStats::from_log(&self.log)
    }

    /// Clear the log and the profile
    pub fn reset(&mut self) {
        self.log.clear();
        self.preferences = None;
        info!(event_name = "personalization.reset", "cleared personalization state");
    }

    /// Record to persist: the most recent interactions and the current profile
    pub fn snapshot(&self) -> PersistedState {
        self.snapshot_at(Utc::now())
    }

    pub fn snapshot_at(&self, now: DateTime<Utc>) -> PersistedState {
        PersistedState {
            interactions: self.log.recent(PERSISTED_INTERACTIONS).cloned().collect(),
            preferences: self.preferences.clone(),
            timestamp: now,
        }
    }

    /// Replace in-memory state with a persisted record
    pub fn restore(&mut self, state: PersistedState) {
        self.log = InteractionLog::from_entries(state.interactions);
        self.preferences = state.preferences;
        debug!(
            event_name = "personalization.restored",
            interactions = self.log.len(),
            has_profile = self.preferences.is_some(),
            "restored personalization state"
        );
    }

    fn recompute(&mut self, now: DateTime<Utc>) {
        if let Some(preferences) = infer_preferences(&self.log, &self.catalog, now) {
            debug!(
                event_name = "personalization.preferences.inferred",
                favorite_regions = preferences.favorite_regions.len(),
                "recomputed preference profile"
            );
            self.preferences = Some(preferences);
        }
    }
}
