//! Scoring algorithms for country recommendations

use std::collections::HashSet;

use super::types::*;
use super::CONFIDENCE_SATURATION;
use crate::catalog::{CostCategory, CountryFeatures, FeatureCatalog, Region};
use crate::interactions::{Interaction, InteractionAction, InteractionLog};
use crate::preferences::{UserPreferences, VisaPreference};

/// Weights for scoring components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Weight for favorite-region match (default: 0.30)
    pub region: f64,
    /// Weight for safety closeness (default: 0.25)
    pub safety: f64,
    /// Weight for budget match (default: 0.20)
    pub budget: f64,
    /// Weight for population-category match (default: 0.15)
    pub population: f64,
    /// Weight for visa match (default: 0.10)
    pub visa: f64,
    /// Weight for prior-interaction bonus (default: 0.10)
    pub history: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        super::DEFAULT_WEIGHTS
    }
}

/// `1 - |a - b| / 5`
fn safety_closeness(a: u8, b: u8) -> f64 {
    1.0 - f64::from(a.abs_diff(b)) / 5.0
}

/// Pairwise similarity between two catalog countries (0.0 - 1.0).
///
/// Region 0.4, population category 0.2, safety closeness 0.2, cost category 0.1,
/// visa requirement 0.1.
pub fn country_similarity(a: &CountryFeatures, b: &CountryFeatures) -> f64 {
    let mut similarity = 0.0;

    if a.region == b.region {
        similarity += 0.4;
    }
    if a.population_category == b.population_category {
        similarity += 0.2;
    }
    similarity += 0.2 * safety_closeness(a.safety_rating, b.safety_rating);
    if a.cost_category == b.cost_category {
        similarity += 0.1;
    }
    if a.visa_required == b.visa_required {
        similarity += 0.1;
    }

    similarity
}

/// Score calculator for country recommendations
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    weights: ScoringWeights,
}

impl ScoreCalculator {
    /// Create a new score calculator with default weights
    pub fn new() -> Self {
        Self { weights: ScoringWeights::default() }
    }

    /// Create with custom weights
    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Calculate total score for a country
    pub fn calculate_total_score(&self, scores: &ComponentScores) -> f64 {
        let total = scores.region * self.weights.region
            + scores.safety * self.weights.safety
            + scores.budget * self.weights.budget
            + scores.population * self.weights.population
            + scores.visa * self.weights.visa
            + scores.history * self.weights.history;

        total.min(1.0)
    }

    /// Compute every component for one candidate
    pub fn component_scores(
        &self,
        country: &CountryFeatures,
        preferences: &UserPreferences,
        log: &InteractionLog,
    ) -> ComponentScores {
        ComponentScores {
            region: self.region_score(country.region, preferences),
            safety: safety_closeness(country.safety_rating, preferences.preferred_safety_rating),
            budget: self.budget_score(country.cost_category, preferences.budget_range),
            population: if country.population_category == preferences.population_preference {
                1.0
            } else {
                0.5
            },
            visa: self.visa_score(country.visa_required, preferences.visa_preference),
            history: self.history_score(log, &country.name),
        }
    }

    /// 1.0 for the top favorite region, 0.7 for the other favorites, else 0
    pub fn region_score(&self, region: Region, preferences: &UserPreferences) -> f64 {
        match preferences.region_rank(region) {
            Some(0) => 1.0,
            Some(_) => 0.7,
            None => 0.0,
        }
    }

    /// 1.0 exact tier; 0.7 for a medium-cost country under a low or high budget; 0.3 otherwise
    pub fn budget_score(&self, cost: CostCategory, budget: CostCategory) -> f64 {
        match (cost, budget) {
            _ if cost == budget => 1.0,
            (CostCategory::Medium, CostCategory::Low | CostCategory::High) => 0.7,
            _ => 0.3,
        }
    }

    pub fn visa_score(&self, visa_required: bool, preference: VisaPreference) -> f64 {
        match (preference, visa_required) {
            (VisaPreference::Any, _) => 1.0,
            (VisaPreference::VisaFree, false) | (VisaPreference::EasyVisa, false) => 1.0,
            (VisaPreference::EasyVisa, true) => 0.7,
            (VisaPreference::VisaFree, true) => 0.3,
        }
    }

    /// Normalized sum of action weights over every logged interaction with the country
    pub fn history_score(&self, log: &InteractionLog, country_name: &str) -> f64 {
        let total: f64 = log.for_country(country_name).map(interaction_weight).sum();
        (total / 10.0).min(1.0)
    }

    /// Mean similarity to every distinct known country the user interacted with; 0.5 with
    /// no such history
    pub fn similarity_to_history(
        &self,
        country: &CountryFeatures,
        log: &InteractionLog,
        catalog: &FeatureCatalog,
    ) -> f64 {
        let explored: Vec<&CountryFeatures> =
            log.distinct_countries().into_iter().filter_map(|name| catalog.get(name)).collect();

        if explored.is_empty() {
            return 0.5;
        }

        explored.iter().map(|other| country_similarity(country, other)).sum::<f64>()
            / explored.len() as f64
    }

    /// Average of data volume and preference match
    pub fn confidence(&self, total_interactions: usize, score: f64) -> f64 {
        let volume = (total_interactions as f64 / CONFIDENCE_SATURATION as f64).min(1.0);
        (volume + score) / 2.0
    }

    /// Generate human-readable reasoning
    pub fn generate_reasoning(
        &self,
        country: &CountryFeatures,
        preferences: &UserPreferences,
        scores: &ComponentScores,
    ) -> Vec<String> {
        let mut reasons = Vec::new();

        if preferences.region_rank(country.region).is_some() {
            reasons.push(format!("Located in your preferred region: {}", country.region));
        }

        if country.safety_rating.abs_diff(preferences.preferred_safety_rating) <= 1 {
            reasons.push(format!(
                "Matches your safety preferences ({}/5 rating)",
                country.safety_rating
            ));
        }

        if scores.budget >= 0.7 {
            reasons.push(format!("Fits your {} budget range", preferences.budget_range));
        }

        if country.population_category == preferences.population_preference {
            reasons.push(format!(
                "{} population size matches your preference",
                capitalize(country.population_category.as_str())
            ));
        }

        if !country.visa_required && preferences.visa_preference != VisaPreference::Any {
            reasons.push("Visa-free travel available".to_string());
        }

        if scores.history > 0.3 {
            reasons.push("Based on your previous interest in this country".to_string());
        }

        // Ensure at least one reason
        if reasons.is_empty() {
            reasons.push("Recommended based on similar user preferences".to_string());
        }

        reasons
    }

    /// Region-diverse selection over candidates already sorted by score.
    ///
    /// The first pass takes the best candidate of each region; the second pass fills the
    /// remaining slots by score regardless of region.
    pub fn diversify(
        &self,
        candidates: Vec<Recommendation>,
        limit: usize,
    ) -> Vec<Recommendation> {
        let mut used_regions: HashSet<Region> = HashSet::new();
        let mut diverse: Vec<Recommendation> = Vec::new();
        let mut overflow: Vec<Recommendation> = Vec::new();

        for candidate in candidates {
            let fresh_region = match candidate.region {
                Some(region) => !used_regions.contains(&region),
                None => false,
            };

            if fresh_region && diverse.len() < limit {
                if let Some(region) = candidate.region {
                    used_regions.insert(region);
                }
                diverse.push(candidate);
            } else {
                overflow.push(candidate);
            }
        }

        let needed = limit.saturating_sub(diverse.len());
        diverse.extend(overflow.into_iter().take(needed));

        diverse.truncate(limit);
        diverse
    }
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Weight of one interaction toward the history bonus
pub(crate) fn interaction_weight(interaction: &Interaction) -> f64 {
    match interaction.action {
        InteractionAction::Hover => 0.1,
        InteractionAction::Click => 0.3,
        InteractionAction::Pin => 0.5,
        InteractionAction::Search => 0.4,
        InteractionAction::Rate => f64::from(interaction.rating.unwrap_or(3)) * 0.2,
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::catalog::PopulationCategory;
    use crate::preferences::TravelStyle;

    fn preferences() -> UserPreferences {
        UserPreferences {
            favorite_regions: vec![Region::EastAsia, Region::SoutheastAsia],
            preferred_safety_rating: 5,
            budget_range: CostCategory::High,
            travel_style: TravelStyle::Cultural,
            population_preference: PopulationCategory::Medium,
            visa_preference: VisaPreference::VisaFree,
            last_updated: Utc::now(),
        }
    }

    fn recommendation(country: &str, region: Region, score: f64) -> Recommendation {
        Recommendation {
            country: country.to_string(),
            region: Some(region),
            score,
            reasoning: vec![],
            similarity: 0.5,
            confidence: 0.5,
            component_scores: ComponentScores::default(),
        }
    }

    #[test]
    fn test_total_score_calculation() {
        let calculator = ScoreCalculator::new();
        let components = ComponentScores {
            region: 1.0,
            safety: 0.8,
            budget: 0.7,
            population: 0.5,
            visa: 1.0,
            history: 0.2,
        };

        let total = calculator.calculate_total_score(&components);
        // 0.30 + 0.20 + 0.14 + 0.075 + 0.10 + 0.02 = 0.835
        assert!((total - 0.835).abs() < 1e-9);
    }

    #[test]
    fn test_total_score_is_capped() {
        let calculator = ScoreCalculator::new();
        let components = ComponentScores {
            region: 1.0,
            safety: 1.0,
            budget: 1.0,
            population: 1.0,
            visa: 1.0,
            history: 1.0,
        };

        assert!((calculator.calculate_total_score(&components) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_region_score_by_rank() {
        let calculator = ScoreCalculator::new();
        let prefs = preferences();

        assert_eq!(calculator.region_score(Region::EastAsia, &prefs), 1.0);
        assert_eq!(calculator.region_score(Region::SoutheastAsia, &prefs), 0.7);
        assert_eq!(calculator.region_score(Region::MiddleEast, &prefs), 0.0);
    }

    #[test]
    fn test_budget_score_tiers() {
        let calculator = ScoreCalculator::new();

        assert_eq!(calculator.budget_score(CostCategory::High, CostCategory::High), 1.0);
        assert_eq!(calculator.budget_score(CostCategory::Medium, CostCategory::High), 0.7);
        assert_eq!(calculator.budget_score(CostCategory::Medium, CostCategory::Low), 0.7);
        assert_eq!(calculator.budget_score(CostCategory::Low, CostCategory::High), 0.3);
    }

    #[test]
    fn test_medium_budget_gives_no_partial_credit() {
        let calculator = ScoreCalculator::new();

        assert_eq!(calculator.budget_score(CostCategory::Low, CostCategory::Medium), 0.3);
        assert_eq!(calculator.budget_score(CostCategory::High, CostCategory::Medium), 0.3);

        let prefs = UserPreferences { budget_range: CostCategory::Medium, ..preferences() };
        let catalog = crate::catalog::FeatureCatalog::new();
        let bangladesh = catalog.get("Bangladesh").expect("bangladesh");
        let scores = calculator.component_scores(bangladesh, &prefs, &InteractionLog::new());
        assert_eq!(scores.budget, 0.3);
        let reasoning = calculator.generate_reasoning(bangladesh, &prefs, &scores);
        assert!(!reasoning.iter().any(|reason| reason.contains("budget range")));
    }

    #[test]
    fn test_visa_score_rules() {
        let calculator = ScoreCalculator::new();

        assert_eq!(calculator.visa_score(true, VisaPreference::Any), 1.0);
        assert_eq!(calculator.visa_score(false, VisaPreference::VisaFree), 1.0);
        assert_eq!(calculator.visa_score(true, VisaPreference::VisaFree), 0.3);
        assert_eq!(calculator.visa_score(false, VisaPreference::EasyVisa), 1.0);
        assert_eq!(calculator.visa_score(true, VisaPreference::EasyVisa), 0.7);
    }

    #[test]
    fn test_history_score_weights_and_cap() {
        let calculator = ScoreCalculator::new();
        let mut log = InteractionLog::new();
        log.push(Interaction::hover("Japan"));
        log.push(Interaction::click("Japan"));
        log.push(Interaction::pin("Japan"));
        log.push(Interaction::search("Japan"));
        log.push(Interaction::rate("Japan", 5).expect("valid rating"));
        log.push(Interaction::hover("China"));

        // (0.1 + 0.3 + 0.5 + 0.4 + 1.0) / 10 = 0.23
        assert!((calculator.history_score(&log, "Japan") - 0.23).abs() < 1e-9);
        assert_eq!(calculator.history_score(&log, "India"), 0.0);

        for _ in 0..20 {
            log.push(Interaction::pin("China"));
        }
        assert_eq!(calculator.history_score(&log, "China"), 1.0);
    }

    #[test]
    fn test_similarity_is_symmetric_and_maximal_for_self() {
        let catalog = FeatureCatalog::new();
        let japan = catalog.get("Japan").expect("japan");
        let korea = catalog.get("South Korea").expect("korea");

        assert!((country_similarity(japan, japan) - 1.0).abs() < 1e-9);
        assert!((country_similarity(japan, korea) - country_similarity(korea, japan)).abs() < 1e-9);
        // region 0.4 + population 0.2 + safety 0.2 + visa 0.1 (cost differs)
        assert!((country_similarity(japan, korea) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_without_history_is_neutral() {
        let calculator = ScoreCalculator::new();
        let catalog = FeatureCatalog::new();
        let japan = catalog.get("Japan").expect("japan");

        let mut log = InteractionLog::new();
        assert_eq!(calculator.similarity_to_history(japan, &log, &catalog), 0.5);

        log.push(Interaction::hover("Atlantis"));
        assert_eq!(calculator.similarity_to_history(japan, &log, &catalog), 0.5);
    }

    #[test]
    fn test_reasoning_order_and_fallback() {
        let calculator = ScoreCalculator::new();
        let catalog = FeatureCatalog::new();
        let prefs = preferences();

        let japan = catalog.get("Japan").expect("japan");
        let scores = ComponentScores { budget: 1.0, history: 0.4, ..ComponentScores::default() };
        let reasons = calculator.generate_reasoning(japan, &prefs, &scores);
        assert_eq!(
            reasons,
            vec![
                "Located in your preferred region: East Asia".to_string(),
                "Matches your safety preferences (5/5 rating)".to_string(),
                "Fits your high budget range".to_string(),
                "Medium population size matches your preference".to_string(),
                "Visa-free travel available".to_string(),
                "Based on your previous interest in this country".to_string(),
            ]
        );

        let nigeria = catalog.get("Nigeria").expect("nigeria");
        let scores = ComponentScores { budget: 0.3, ..ComponentScores::default() };
        assert_eq!(
            calculator.generate_reasoning(nigeria, &prefs, &scores),
            vec!["Recommended based on similar user preferences".to_string()]
        );
    }

    #[test]
    fn test_diversity_filtering() {
        let calculator = ScoreCalculator::new();
        let candidates = vec![
            recommendation("Japan", Region::EastAsia, 0.95),
            recommendation("South Korea", Region::EastAsia, 0.9),
            recommendation("China", Region::EastAsia, 0.85),
            recommendation("Thailand", Region::SoutheastAsia, 0.8),
            recommendation("India", Region::SouthAsia, 0.6),
        ];

        let picked = calculator.diversify(candidates.clone(), 3);
        let names: Vec<_> = picked.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, vec!["Japan", "Thailand", "India"]);

        let picked = calculator.diversify(candidates, 4);
        let names: Vec<_> = picked.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, vec!["Japan", "Thailand", "India", "South Korea"]);
    }
}
