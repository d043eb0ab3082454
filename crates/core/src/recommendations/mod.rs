//! Personalized Country Recommendation Engine
//!
//! Scores catalog countries against the inferred preference profile, explains each
//! score in plain language, and keeps the final list regionally diverse.

mod engine;
mod scoring;
mod types;

pub use engine::RecommendationEngine;
pub use scoring::{country_similarity, ScoreCalculator, ScoringWeights};
pub use types::*;

/// Default scoring weights
pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    region: 0.30,
    safety: 0.25,
    budget: 0.20,
    population: 0.15,
    visa: 0.10,
    history: 0.10,
};

/// Recommendations returned when the caller does not ask for a specific count
pub const DEFAULT_LIMIT: usize = 5;

/// Below this many recorded interactions the popular list is served
pub const MIN_INTERACTIONS_FOR_PERSONALIZATION: usize = 3;

/// Interaction count at which the data-volume half of confidence saturates
pub const CONFIDENCE_SATURATION: usize = 50;

/// Cold-start list, in popularity order
pub const POPULAR_COUNTRIES: [&str; 5] = ["Japan", "South Korea", "Singapore", "Thailand", "Malaysia"];

pub const POPULAR_SCORE: f64 = 0.7;
pub const POPULAR_SIMILARITY: f64 = 0.5;
pub const POPULAR_CONFIDENCE: f64 = 0.3;
