//! User preference profile
//!
//! The profile is either inferred from the interaction log (see [`infer_preferences`]) or
//! edited field by field through [`PreferenceUpdate`].

mod inference;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{CostCategory, PopulationCategory, Region};
use crate::errors::DomainError;

pub use inference::{infer_preferences, PROFILE_MIN_INTERACTIONS, PROFILE_WINDOW};

/// Neutral safety rating used when the user never rated anything
pub const DEFAULT_SAFETY_RATING: u8 = 3;

/// Maximum number of favorite regions kept on a profile
pub const MAX_FAVORITE_REGIONS: usize = 3;

/// Travel style inferred from the kinds of countries a user looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    Adventure,
    Cultural,
    Business,
    Relaxation,
}

impl TravelStyle {
    /// Declaration order, which is also the majority-vote tie-break order
    pub const ALL: [TravelStyle; 4] =
        [TravelStyle::Adventure, TravelStyle::Cultural, TravelStyle::Business, TravelStyle::Relaxation];

    /// Countries that vote for this style. Not restricted to catalog countries.
    pub fn countries(&self) -> &'static [&'static str] {
        match self {
            TravelStyle::Adventure => &["Nepal", "New Zealand", "Norway", "Chile"],
            TravelStyle::Cultural => &["Italy", "Greece", "Egypt", "India", "Japan", "Turkey"],
            TravelStyle::Business => &["Singapore", "United States", "Germany", "South Korea"],
            TravelStyle::Relaxation => &["Thailand", "Malaysia", "Philippines", "Brazil"],
        }
    }

    pub fn matches(&self, country_name: &str) -> bool {
        self.countries().contains(&country_name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelStyle::Adventure => "adventure",
            TravelStyle::Cultural => "cultural",
            TravelStyle::Business => "business",
            TravelStyle::Relaxation => "relaxation",
        }
    }
}

impl fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelStyle {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "adventure" => Ok(Self::Adventure),
            "cultural" => Ok(Self::Cultural),
            "business" => Ok(Self::Business),
            "relaxation" => Ok(Self::Relaxation),
            _ => Err(DomainError::invalid_value(
                "travel_style",
                value,
                "adventure|cultural|business|relaxation",
            )),
        }
    }
}

/// How much visa friction the user tolerates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisaPreference {
    VisaFree,
    EasyVisa,
    Any,
}

impl VisaPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisaPreference::VisaFree => "visa-free",
            VisaPreference::EasyVisa => "easy-visa",
            VisaPreference::Any => "any",
        }
    }
}

impl fmt::Display for VisaPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisaPreference {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "visa-free" | "visa_free" => Ok(Self::VisaFree),
            "easy-visa" | "easy_visa" => Ok(Self::EasyVisa),
            "any" => Ok(Self::Any),
            _ => Err(DomainError::invalid_value("visa_preference", value, "visa-free|easy-visa|any")),
        }
    }
}

/// Derived (or manually edited) user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Most frequent first, at most [`MAX_FAVORITE_REGIONS`]
    pub favorite_regions: Vec<Region>,
    /// Preferred safety rating (1 - 5)
    pub preferred_safety_rating: u8,
    pub budget_range: CostCategory,
    pub travel_style: TravelStyle,
    pub population_preference: PopulationCategory,
    pub visa_preference: VisaPreference,
    pub last_updated: DateTime<Utc>,
}

impl UserPreferences {
    /// Profile created when a user edits a preference before enough data exists
    pub fn manual_default(now: DateTime<Utc>) -> Self {
        Self {
            favorite_regions: Vec::new(),
            preferred_safety_rating: DEFAULT_SAFETY_RATING,
            budget_range: CostCategory::Medium,
            travel_style: TravelStyle::Cultural,
            population_preference: PopulationCategory::Medium,
            visa_preference: VisaPreference::Any,
            last_updated: now,
        }
    }

    /// Position of a region in the favorites list
    pub fn region_rank(&self, region: Region) -> Option<usize> {
        self.favorite_regions.iter().position(|favorite| *favorite == region)
    }

    /// Check the range-bound fields, as the validating [`PreferenceUpdate`] constructors do
    pub fn validate(&self) -> Result<(), DomainError> {
        PreferenceUpdate::preferred_safety_rating(self.preferred_safety_rating)?;
        PreferenceUpdate::favorite_regions(self.favorite_regions.clone())?;
        Ok(())
    }

    /// Apply one validated field update
    pub fn apply(&mut self, update: PreferenceUpdate, now: DateTime<Utc>) {
        match update {
            PreferenceUpdate::FavoriteRegions(regions) => self.favorite_regions = regions,
            PreferenceUpdate::PreferredSafetyRating(rating) => self.preferred_safety_rating = rating,
            PreferenceUpdate::BudgetRange(budget) => self.budget_range = budget,
            PreferenceUpdate::TravelStyle(style) => self.travel_style = style,
            PreferenceUpdate::PopulationPreference(category) => {
                self.population_preference = category
            }
            PreferenceUpdate::VisaPreference(visa) => self.visa_preference = visa,
        }
        self.last_updated = now;
    }
}

/// One explicit preference edit. Construct through [`PreferenceUpdate::parse`] or the
/// validating constructors so that every value is in range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum PreferenceUpdate {
    FavoriteRegions(Vec<Region>),
    PreferredSafetyRating(u8),
    BudgetRange(CostCategory),
    TravelStyle(TravelStyle),
    PopulationPreference(PopulationCategory),
    VisaPreference(VisaPreference),
}

impl PreferenceUpdate {
    pub const FIELDS: [&'static str; 6] = [
        "favorite_regions",
        "preferred_safety_rating",
        "budget_range",
        "travel_style",
        "population_preference",
        "visa_preference",
    ];

    pub fn favorite_regions(regions: Vec<Region>) -> Result<Self, DomainError> {
        if regions.len() > MAX_FAVORITE_REGIONS {
            return Err(DomainError::invalid_value(
                "favorite_regions",
                format!("{} regions", regions.len()),
                format!("at most {MAX_FAVORITE_REGIONS} regions"),
            ));
        }
        Ok(Self::FavoriteRegions(regions))
    }

    pub fn preferred_safety_rating(rating: u8) -> Result<Self, DomainError> {
        if (1..=5).contains(&rating) {
            Ok(Self::PreferredSafetyRating(rating))
        } else {
            Err(DomainError::SafetyRatingOutOfRange(rating))
        }
    }

    /// Parse a `field`/`value` pair from an untyped boundary (CLI, form input)
    pub fn parse(field: &str, value: &str) -> Result<Self, DomainError> {
        match field.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "favorite_regions" => {
                let regions = value
                    .split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(str::parse::<Region>)
                    .collect::<Result<Vec<_>, _>>()?;
                Self::favorite_regions(regions)
            }
            "preferred_safety_rating" => {
                let rating = value.trim().parse::<u8>().map_err(|_| {
                    DomainError::invalid_value("preferred_safety_rating", value, "an integer 1..=5")
                })?;
                Self::preferred_safety_rating(rating)
            }
            "budget_range" => Ok(Self::BudgetRange(value.parse()?)),
            "travel_style" => Ok(Self::TravelStyle(value.parse()?)),
            "population_preference" => Ok(Self::PopulationPreference(value.parse()?)),
            "visa_preference" => Ok(Self::VisaPreference(value.parse()?)),
            _ => Err(DomainError::invalid_value("field", field, Self::FIELDS.join("|"))),
        }
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            Self::FavoriteRegions(_) => "favorite_regions",
            Self::PreferredSafetyRating(_) => "preferred_safety_rating",
            Self::BudgetRange(_) => "budget_range",
            Self::TravelStyle(_) => "travel_style",
            Self::PopulationPreference(_) => "population_preference",
            Self::VisaPreference(_) => "visa_preference",
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn parse_accepts_every_field() {
        assert_eq!(
            PreferenceUpdate::parse("favorite_regions", "East Asia, Middle East"),
            Ok(PreferenceUpdate::FavoriteRegions(vec![Region::EastAsia, Region::MiddleEast]))
        );
        assert_eq!(
            PreferenceUpdate::parse("preferred-safety-rating", "4"),
            Ok(PreferenceUpdate::PreferredSafetyRating(4))
        );
        assert_eq!(
            PreferenceUpdate::parse("budget_range", "HIGH"),
            Ok(PreferenceUpdate::BudgetRange(CostCategory::High))
        );
        assert_eq!(
            PreferenceUpdate::parse("travel_style", "relaxation"),
            Ok(PreferenceUpdate::TravelStyle(TravelStyle::Relaxation))
        );
        assert_eq!(
            PreferenceUpdate::parse("population_preference", "small"),
            Ok(PreferenceUpdate::PopulationPreference(PopulationCategory::Small))
        );
        assert_eq!(
            PreferenceUpdate::parse("visa_preference", "visa-free"),
            Ok(PreferenceUpdate::VisaPreference(VisaPreference::VisaFree))
        );
    }

    #[test]
    fn parse_rejects_invalid_values() {
        assert_eq!(
            PreferenceUpdate::parse("preferred_safety_rating", "9"),
            Err(DomainError::SafetyRatingOutOfRange(9))
        );
        assert!(PreferenceUpdate::parse("budget_range", "free").is_err());
        assert!(PreferenceUpdate::parse("last_updated", "now").is_err());
        assert!(PreferenceUpdate::parse(
            "favorite_regions",
            "East Asia,South Asia,Middle East,West Africa"
        )
        .is_err());
    }

    #[test]
    fn apply_updates_field_and_timestamp() {
        let created = Utc::now();
        let mut preferences = UserPreferences::manual_default(created);
        let later = created + Duration::seconds(30);

        preferences.apply(PreferenceUpdate::BudgetRange(CostCategory::Low), later);

        assert_eq!(preferences.budget_range, CostCategory::Low);
        assert_eq!(preferences.last_updated, later);
        assert_eq!(preferences.travel_style, TravelStyle::Cultural);
    }

    #[test]
    fn visa_preference_serializes_kebab_case() {
        let json = serde_json::to_string(&VisaPreference::EasyVisa).expect("serialize");
        assert_eq!(json, "\"easy-visa\"");
    }

    #[test]
    fn validate_rejects_out_of_range_profiles() {
        let valid = UserPreferences::manual_default(Utc::now());
        assert!(valid.validate().is_ok());

        let unsafe_rating = UserPreferences { preferred_safety_rating: 200, ..valid.clone() };
        assert_eq!(unsafe_rating.validate(), Err(DomainError::SafetyRatingOutOfRange(200)));

        let too_many = UserPreferences {
            favorite_regions: vec![
                Region::EastAsia,
                Region::SouthAsia,
                Region::MiddleEast,
                Region::NorthAfrica,
            ],
            ..valid
        };
        assert!(too_many.validate().is_err());
    }
}
