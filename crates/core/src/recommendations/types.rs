//! Types for the Recommendation Engine

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{normalize_country_name, Region};

/// Request for country recommendations
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    /// Canonical names that must not appear in the result
    pub exclude: HashSet<String>,
    /// Maximum number of recommendations to return
    pub limit: usize,
}

impl RecommendationRequest {
    pub fn new() -> Self {
        Self { exclude: HashSet::new(), limit: super::DEFAULT_LIMIT }
    }

    /// Exclude countries; names are normalized on the way in
    pub fn with_exclude<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude
            .extend(countries.into_iter().map(|name| normalize_country_name(name.as_ref())));
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn excludes(&self, country_name: &str) -> bool {
        self.exclude.contains(country_name)
    }
}

impl Default for RecommendationRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// A ranked country with scoring and reasoning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    /// Weighted total (0.0 - 1.0)
    pub score: f64,
    /// Human-readable reasons, in fixed priority order
    pub reasoning: Vec<String>,
    /// Mean similarity to countries the user has explored (0.0 - 1.0)
    pub similarity: f64,
    /// (0.0 - 1.0)
    pub confidence: f64,
    /// Unweighted component scores
    pub component_scores: ComponentScores,
}

/// Individual scoring components, each in 0.0 - 1.0 before weighting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ComponentScores {
    pub region: f64,
    pub safety: f64,
    pub budget: f64,
    pub population: f64,
    pub visa: f64,
    pub history: f64,
}
