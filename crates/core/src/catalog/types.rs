//! Types for the Feature Catalog

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Geographic region used for preference matching and diversity filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "East Asia")]
    EastAsia,
    #[serde(rename = "South Asia")]
    SouthAsia,
    #[serde(rename = "Southeast Asia")]
    SoutheastAsia,
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "South America")]
    SouthAmerica,
    #[serde(rename = "West Africa")]
    WestAfrica,
    #[serde(rename = "North Africa")]
    NorthAfrica,
    #[serde(rename = "Middle East")]
    MiddleEast,
    #[serde(rename = "Europe/Asia")]
    EuropeAsia,
    #[serde(rename = "Europe/Middle East")]
    EuropeMiddleEast,
}

impl Region {
    pub const ALL: [Region; 10] = [
        Region::EastAsia,
        Region::SouthAsia,
        Region::SoutheastAsia,
        Region::NorthAmerica,
        Region::SouthAmerica,
        Region::WestAfrica,
        Region::NorthAfrica,
        Region::MiddleEast,
        Region::EuropeAsia,
        Region::EuropeMiddleEast,
    ];

    /// Display name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::EastAsia => "East Asia",
            Region::SouthAsia => "South Asia",
            Region::SoutheastAsia => "Southeast Asia",
            Region::NorthAmerica => "North America",
            Region::SouthAmerica => "South America",
            Region::WestAfrica => "West Africa",
            Region::NorthAfrica => "North Africa",
            Region::MiddleEast => "Middle East",
            Region::EuropeAsia => "Europe/Asia",
            Region::EuropeMiddleEast => "Europe/Middle East",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Region::ALL
            .into_iter()
            .find(|region| region.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let expected =
                    Region::ALL.iter().map(Region::as_str).collect::<Vec<_>>().join("|");
                DomainError::invalid_value("region", value, expected)
            })
    }
}

/// Population bucket: small (< 50M), medium (< 200M), large (>= 200M)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopulationCategory {
    Small,
    Medium,
    Large,
}

impl PopulationCategory {
    /// Declaration order, which is also the majority-vote tie-break order
    pub const ALL: [PopulationCategory; 3] =
        [PopulationCategory::Small, PopulationCategory::Medium, PopulationCategory::Large];

    pub fn from_population(population: u64) -> Self {
        if population < 50_000_000 {
            PopulationCategory::Small
        } else if population < 200_000_000 {
            PopulationCategory::Medium
        } else {
            PopulationCategory::Large
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PopulationCategory::Small => "small",
            PopulationCategory::Medium => "medium",
            PopulationCategory::Large => "large",
        }
    }
}

impl fmt::Display for PopulationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PopulationCategory {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            _ => Err(DomainError::invalid_value("population_category", value, "small|medium|large")),
        }
    }
}

/// Travel cost tier; doubles as the user's budget range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostCategory {
    Low,
    Medium,
    High,
}

impl CostCategory {
    pub const ALL: [CostCategory; 3] = [CostCategory::Low, CostCategory::Medium, CostCategory::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            CostCategory::Low => "low",
            CostCategory::Medium => "medium",
            CostCategory::High => "high",
        }
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostCategory {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(DomainError::invalid_value("cost_category", value, "low|medium|high")),
        }
    }
}

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Static per-country record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryFeatures {
    /// Canonical display name
    pub name: String,
    pub population: u64,
    pub population_category: PopulationCategory,
    pub region: Region,
    /// Safety rating (1 - 5)
    pub safety_rating: u8,
    pub cost_category: CostCategory,
    pub visa_required: bool,
    /// Annual population growth, percent
    pub growth_rate: f64,
    pub coordinates: Coordinates,
}
