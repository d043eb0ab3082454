//! Aggregate view over the interaction log

use serde::{Deserialize, Serialize};

use crate::interactions::{Interaction, InteractionLog};

/// Number of entries returned in [`InteractionStats::recent_activity`]
pub const RECENT_ACTIVITY_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionStats {
    pub total_interactions: usize,
    /// Distinct country names, known or not
    pub countries_explored: usize,
    /// Mean of explicit ratings; 0.0 when nothing was rated
    pub average_rating: f64,
    pub most_viewed_country: Option<String>,
    /// Last entries of the log, oldest first
    pub recent_activity: Vec<Interaction>,
}

impl InteractionStats {
    pub fn from_log(log: &InteractionLog) -> Self {
        let ratings: Vec<f64> =
            log.iter().filter_map(|interaction| interaction.rating.map(f64::from)).collect();
        let average_rating = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().sum::<f64>() / ratings.len() as f64
        };

        Self {
            total_interactions: log.len(),
            countries_explored: log.distinct_countries().len(),
            average_rating,
            most_viewed_country: most_viewed_country(log).map(str::to_owned),
            recent_activity: log.recent(RECENT_ACTIVITY_LEN).cloned().collect(),
        }
    }
}

/// Country with the most interactions; on a tie the one seen first wins
pub fn most_viewed_country(log: &InteractionLog) -> Option<&str> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for interaction in log.iter() {
        match counts.iter_mut().find(|(name, _)| *name == interaction.country_name) {
            Some((_, count)) => *count += 1,
            None => counts.push((interaction.country_name.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (name, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((name, count));
        }
    }
    best.map(|(name, _)| name)
}
