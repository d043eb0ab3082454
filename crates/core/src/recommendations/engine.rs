//! Recommendation engine: ranks catalog countries for the current profile

use std::cmp::Ordering;

use tracing::debug;

use super::scoring::{ScoreCalculator, ScoringWeights};
use super::types::*;
use super::{
    MIN_INTERACTIONS_FOR_PERSONALIZATION, POPULAR_CONFIDENCE, POPULAR_COUNTRIES, POPULAR_SCORE,
    POPULAR_SIMILARITY,
};
use crate::catalog::FeatureCatalog;
use crate::interactions::InteractionLog;
use crate::preferences::UserPreferences;

/// Main recommendation engine
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    calculator: ScoreCalculator,
}

impl RecommendationEngine {
    /// Create a new recommendation engine with default weights
    pub fn new() -> Self {
        Self { calculator: ScoreCalculator::new() }
    }

    /// Create with custom scoring weights
    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self { calculator: ScoreCalculator::with_weights(weights) }
    }

    pub fn calculator(&self) -> &ScoreCalculator {
        &self.calculator
    }

    /// Whether [`RecommendationEngine::recommend`] scores the catalog instead of serving
    /// the popular list
    pub fn is_personalized(log: &InteractionLog, preferences: Option<&UserPreferences>) -> bool {
        preferences.is_some() && log.len() >= MIN_INTERACTIONS_FOR_PERSONALIZATION
    }

    /// Produce up to `request.limit` recommendations.
    ///
    /// Serves the fixed popular list while there is no profile or fewer than
    /// three recorded interactions. Output is deterministic for identical inputs.
    pub fn recommend(
        &self,
        catalog: &FeatureCatalog,
        log: &InteractionLog,
        preferences: Option<&UserPreferences>,
        request: &RecommendationRequest,
    ) -> Vec<Recommendation> {
        let preferences = match preferences {
            Some(preferences) if Self::is_personalized(log, Some(preferences)) => preferences,
            _ => return self.popular(catalog, request),
        };

        let mut scored: Vec<Recommendation> = catalog
            .iter()
            .filter(|country| !request.excludes(&country.name))
            .map(|country| {
                let components = self.calculator.component_scores(country, preferences, log);
                let score = self.calculator.calculate_total_score(&components);
                Recommendation {
                    country: country.name.clone(),
                    region: Some(country.region),
                    score,
                    reasoning: self.calculator.generate_reasoning(country, preferences, &components),
                    similarity: self.calculator.similarity_to_history(country, log, catalog),
                    confidence: self.calculator.confidence(log.len(), score),
                    component_scores: components,
                }
            })
            .collect();

        // Stable sort keeps catalog order for equal scores
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(request.limit.saturating_mul(2));

        let recommendations = self.calculator.diversify(scored, request.limit);

        debug!(
            event_name = "recommendations.scored",
            interactions = log.len(),
            returned = recommendations.len(),
            "scored personalized recommendations"
        );

        recommendations
    }

    fn popular(&self, catalog: &FeatureCatalog, request: &RecommendationRequest) -> Vec<Recommendation> {
        POPULAR_COUNTRIES
            .iter()
            .filter(|name| !request.excludes(name))
            .take(request.limit)
            .map(|name| Recommendation {
                country: (*name).to_string(),
                region: catalog.get(name).map(|country| country.region),
                score: POPULAR_SCORE,
                reasoning: vec![
                    "Popular global destination".to_string(),
                    "Great for first-time visitors".to_string(),
                ],
                similarity: POPULAR_SIMILARITY,
                confidence: POPULAR_CONFIDENCE,
                component_scores: ComponentScores::default(),
            })
            .collect()
    }
}
