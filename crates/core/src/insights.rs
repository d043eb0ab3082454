//! Smart insights for a single focal country
//!
//! Produces up to three short observations tying the country to the user's profile and
//! history, plus the three catalog countries most similar to it.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::{normalize_country_name, CostCategory, CountryFeatures, FeatureCatalog};
use crate::interactions::InteractionLog;
use crate::preferences::{TravelStyle, UserPreferences};
use crate::recommendations::country_similarity;
use crate::stats::most_viewed_country;

pub const MAX_INSIGHTS: usize = 3;
pub const MAX_SIMILAR_COUNTRIES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartInsights {
    pub insights: Vec<String>,
    pub similar_countries: Vec<String>,
}

pub fn generate_smart_insights(
    catalog: &FeatureCatalog,
    log: &InteractionLog,
    preferences: Option<&UserPreferences>,
    country_name: &str,
) -> SmartInsights {
    let country_name = normalize_country_name(country_name);

    let Some(preferences) = preferences else {
        return SmartInsights {
            insights: vec![format!(
                "Welcome to {country_name}! Start exploring more countries to get personalized insights."
            )],
            similar_countries: Vec::new(),
        };
    };

    let Some(country) = catalog.get(&country_name) else {
        return SmartInsights {
            insights: vec![format!(
                "Discover what makes {country_name} unique! Explore more to get personalized insights."
            )],
            similar_countries: Vec::new(),
        };
    };

    let mut insights = profile_insights(country, preferences);
    insights.extend(history_insight(country, log));
    insights.extend(most_viewed_insight(country, catalog, log));
    insights.truncate(MAX_INSIGHTS);

    SmartInsights { insights, similar_countries: similar_countries(country, catalog) }
}

fn profile_insights(country: &CountryFeatures, preferences: &UserPreferences) -> Vec<String> {
    let name = &country.name;
    let mut insights = Vec::new();

    if preferences.region_rank(country.region).is_some() {
        insights.push(format!(
            "Perfect match! {name} is in {}, one of your favorite regions to explore.",
            country.region
        ));
    } else if let Some(usual) = preferences.favorite_regions.first() {
        insights.push(format!(
            "New territory! {name} offers a different perspective from your usual {usual} explorations."
        ));
    }

    let budget = preferences.budget_range;
    if country.cost_category == budget {
        insights.push(format!(
            "Budget-friendly choice! {name}'s {} cost aligns perfectly with your travel budget.",
            country.cost_category
        ));
    } else if country.cost_category == CostCategory::Low {
        insights.push(format!(
            "Great value! {name} offers excellent experiences at a lower cost than your usual destinations."
        ));
    } else if country.cost_category == CostCategory::High {
        insights.push(format!(
            "Premium destination! {name} might be pricier but offers luxury experiences worth the investment."
        ));
    }

    if country.safety_rating >= preferences.preferred_safety_rating {
        insights.push(format!(
            "Feel secure! {name}'s safety rating ({}/5) matches your comfort level.",
            country.safety_rating
        ));
    } else {
        insights.push(format!(
            "Adventure awaits! {name} offers unique experiences, though it requires more travel awareness."
        ));
    }

    if country.population_category == preferences.population_preference {
        insights.push(format!(
            "Perfect size! {name}'s {category} population fits your preference for {category}-sized countries.",
            category = country.population_category
        ));
    }

    insights.push(match preferences.travel_style {
        TravelStyle::Cultural => format!(
            "Rich heritage! {name} offers deep cultural experiences that align with your interests."
        ),
        TravelStyle::Adventure => {
            format!("Thrill seeker's paradise! {name} provides exciting outdoor adventures.")
        }
        TravelStyle::Business => {
            format!("Professional hub! {name} is great for business travel and networking.")
        }
        TravelStyle::Relaxation => {
            format!("Peaceful escape! {name} offers the perfect retreat for relaxation.")
        }
    });

    insights
}

fn history_insight(country: &CountryFeatures, log: &InteractionLog) -> Option<String> {
    let name = &country.name;
    let mut visits = log.for_country(name).peekable();
    visits.peek()?;

    let first_rating = visits.find_map(|interaction| interaction.rating);
    Some(match first_rating {
        Some(rating) => {
            let verdict = match rating {
                4..=5 => "Seems like a favorite!",
                3 => "Worth another look!",
                _ => "Maybe give it another chance?",
            };
            format!("You rated {name} {rating}/5 stars. {verdict}")
        }
        None => format!(
            "You've explored {name} before. Consider rating it to improve your recommendations!"
        ),
    })
}

fn most_viewed_insight(
    country: &CountryFeatures,
    catalog: &FeatureCatalog,
    log: &InteractionLog,
) -> Option<String> {
    let most_viewed = most_viewed_country(log).filter(|name| *name != country.name)?;
    let other = catalog.get(most_viewed)?;

    if other.region == country.region {
        Some(format!(
            "Similar to {most_viewed}! Both countries share the same regional characteristics."
        ))
    } else if other.population_category == country.population_category {
        Some(format!(
            "Like {most_viewed}, {} has a {} population size.",
            country.name, country.population_category
        ))
    } else {
        None
    }
}

/// Other catalog countries ranked by pairwise similarity; ties stay in catalog order
fn similar_countries(country: &CountryFeatures, catalog: &FeatureCatalog) -> Vec<String> {
    let mut ranked: Vec<(&CountryFeatures, f64)> = catalog
        .iter()
        .filter(|other| other.name != country.name)
        .map(|other| (other, country_similarity(country, other)))
        .collect();

    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.into_iter().take(MAX_SIMILAR_COUNTRIES).map(|(other, _)| other.name.clone()).collect()
}
