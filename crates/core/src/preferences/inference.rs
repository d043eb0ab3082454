//! Preference inference over the recent interaction window

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::{
    TravelStyle, UserPreferences, VisaPreference, DEFAULT_SAFETY_RATING, MAX_FAVORITE_REGIONS,
};
use crate::catalog::{CostCategory, CountryFeatures, FeatureCatalog, PopulationCategory, Region};
use crate::interactions::{Interaction, InteractionLog};

/// A profile is only inferred once the log holds this many interactions
pub const PROFILE_MIN_INTERACTIONS: usize = 5;

/// Number of most recent interactions considered by inference
pub const PROFILE_WINDOW: usize = 50;

/// Derive a preference profile from the log.
///
/// Returns `None` while the log holds fewer than [`PROFILE_MIN_INTERACTIONS`] entries.
pub fn infer_preferences(
    log: &InteractionLog,
    catalog: &FeatureCatalog,
    now: DateTime<Utc>,
) -> Option<UserPreferences> {
    if log.len() < PROFILE_MIN_INTERACTIONS {
        return None;
    }

    let window: Vec<&Interaction> = log.recent(PROFILE_WINDOW).collect();
    let known: Vec<&CountryFeatures> =
        window.iter().filter_map(|interaction| catalog.get(&interaction.country_name)).collect();

    Some(UserPreferences {
        favorite_regions: favorite_regions(&known),
        preferred_safety_rating: preferred_safety_rating(&window),
        budget_range: budget_range(&known),
        travel_style: travel_style(&window),
        population_preference: population_preference(&known),
        visa_preference: visa_preference(&known),
        last_updated: now,
    })
}

/// Pick the candidate with the highest count; on a tie the earlier candidate wins.
fn first_majority<T: Copy>(ordered: &[T], fallback: T, count_of: impl Fn(T) -> usize) -> T {
    let mut best = fallback;
    let mut best_count: Option<usize> = None;

    for candidate in ordered.iter().copied() {
        let count = count_of(candidate);
        if best_count.map_or(true, |current| count > current) {
            best = candidate;
            best_count = Some(count);
        }
    }

    best
}

fn favorite_regions(known: &[&CountryFeatures]) -> Vec<Region> {
    // Insertion-ordered counts so the stable sort keeps first-encountered order on ties.
    let mut counts: Vec<(Region, usize)> = Vec::new();
    for country in known {
        match counts.iter_mut().find(|(region, _)| *region == country.region) {
            Some((_, count)) => *count += 1,
            None => counts.push((country.region, 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(MAX_FAVORITE_REGIONS).map(|(region, _)| region).collect()
}

fn preferred_safety_rating(window: &[&Interaction]) -> u8 {
    let ratings: Vec<u8> = window.iter().filter_map(|interaction| interaction.rating).collect();
    if ratings.is_empty() {
        return DEFAULT_SAFETY_RATING;
    }

    let mean = ratings.iter().map(|rating| f64::from(*rating)).sum::<f64>() / ratings.len() as f64;
    (mean.round() as u8).clamp(1, 5)
}

fn budget_range(known: &[&CountryFeatures]) -> CostCategory {
    let mut counts: HashMap<CostCategory, usize> = HashMap::new();
    for country in known {
        *counts.entry(country.cost_category).or_insert(0) += 1;
    }

    first_majority(&CostCategory::ALL, CostCategory::Low, |category| {
        counts.get(&category).copied().unwrap_or(0)
    })
}

fn travel_style(window: &[&Interaction]) -> TravelStyle {
    first_majority(&TravelStyle::ALL, TravelStyle::Adventure, |style| {
        window.iter().filter(|interaction| style.matches(&interaction.country_name)).count()
    })
}

fn population_preference(known: &[&CountryFeatures]) -> PopulationCategory {
    let mut counts: HashMap<PopulationCategory, usize> = HashMap::new();
    for country in known {
        *counts.entry(country.population_category).or_insert(0) += 1;
    }

    first_majority(&PopulationCategory::ALL, PopulationCategory::Small, |category| {
        counts.get(&category).copied().unwrap_or(0)
    })
}

fn visa_preference(known: &[&CountryFeatures]) -> VisaPreference {
    let visa_required = known.iter().filter(|country| country.visa_required).count();
    let visa_free = known.len() - visa_required;

    if visa_free > visa_required * 2 {
        VisaPreference::VisaFree
    } else if visa_free > visa_required {
        VisaPreference::EasyVisa
    } else {
        VisaPreference::Any
    }
}
