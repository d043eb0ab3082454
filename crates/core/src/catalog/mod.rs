//! Feature Catalog
//!
//! Static per-country attributes used by preference inference, scoring and insights.
//! Every record is keyed by a canonical display name; inbound names go through
//! [`normalize_country_name`] first.

mod types;

use std::collections::HashMap;

pub use types::*;

/// Seed row for one catalog country. The order of [`COUNTRY_SEEDS`] is the catalog
/// iteration order used for every deterministic tie-break.
#[derive(Debug, Clone, Copy)]
struct CountrySeed {
    name: &'static str,
    population: u64,
    region: Region,
    safety_rating: u8,
    cost_category: CostCategory,
    visa_required: bool,
    growth_rate: f64,
    coordinates: (f64, f64),
}

const COUNTRY_SEEDS: &[CountrySeed] = &[
    CountrySeed {
        name: "China",
        population: 1_425_672_000,
        region: Region::EastAsia,
        safety_rating: 4,
        cost_category: CostCategory::Medium,
        visa_required: true,
        growth_rate: 0.2,
        coordinates: (35.8617, 104.1954),
    },
    CountrySeed {
        name: "India",
        population: 1_428_627_000,
        region: Region::SouthAsia,
        safety_rating: 3,
        cost_category: CostCategory::Low,
        visa_required: true,
        growth_rate: 0.8,
        coordinates: (20.5937, 78.9629),
    },
    CountrySeed {
        name: "United States",
        population: 341_814_000,
        region: Region::NorthAmerica,
        safety_rating: 4,
        cost_category: CostCategory::High,
        visa_required: true,
        growth_rate: 0.4,
        coordinates: (37.0902, -95.7129),
    },
    CountrySeed {
        name: "Indonesia",
        population: 277_749_000,
        region: Region::SoutheastAsia,
        safety_rating: 3,
        cost_category: CostCategory::Low,
        visa_required: true,
        growth_rate: 0.9,
        coordinates: (-0.7893, 113.9213),
    },
    CountrySeed {
        name: "Pakistan",
        population: 240_486_000,
        region: Region::SouthAsia,
        safety_rating: 2,
        cost_category: CostCategory::Low,
        visa_required: true,
        growth_rate: 1.9,
        coordinates: (30.3753, 69.3451),
    },
    CountrySeed {
        name: "Brazil",
        population: 216_422_000,
        region: Region::SouthAmerica,
        safety_rating: 3,
        cost_category: CostCategory::Medium,
        visa_required: true,
        growth_rate: 0.6,
        coordinates: (-14.2350, -51.9253),
    },
    CountrySeed {
        name: "Nigeria",
        population: 223_804_000,
        region: Region::WestAfrica,
        safety_rating: 2,
        cost_category: CostCategory::Low,
        visa_required: true,
        growth_rate: 2.4,
        coordinates: (9.0820, 8.6753),
    },
    CountrySeed {
        name: "Bangladesh",
        population: 172_954_000,
        region: Region::SouthAsia,
        safety_rating: 3,
        cost_category: CostCategory::Low,
        visa_required: true,
        growth_rate: 1.0,
        coordinates: (23.6850, 90.3563),
    },
    CountrySeed {
        name: "Russia",
        population: 144_444_000,
        region: Region::EuropeAsia,
        safety_rating: 3,
        cost_category: CostCategory::Medium,
        visa_required: true,
        growth_rate: 0.1,
        coordinates: (61.5240, 105.3188),
    },
    CountrySeed {
        name: "Mexico",
        population: 131_562_000,
        region: Region::NorthAmerica,
        safety_rating: 3,
        cost_category: CostCategory::Low,
        visa_required: true,
        growth_rate: 0.9,
        coordinates: (23.6345, -102.5528),
    },
    CountrySeed {
        name: "Japan",
        population: 123_294_000,
        region: Region::EastAsia,
        safety_rating: 5,
        cost_category: CostCategory::High,
        visa_required: false,
        growth_rate: -0.3,
        coordinates: (36.2048, 138.2529),
    },
    CountrySeed {
        name: "Egypt",
        population: 112_717_000,
        region: Region::NorthAfrica,
        safety_rating: 3,
        cost_category: CostCategory::Low,
        visa_required: true,
        growth_rate: 1.8,
        coordinates: (26.0975, 30.0444),
    },
    CountrySeed {
        name: "Saudi Arabia",
        population: 36_947_000,
        region: Region::MiddleEast,
        safety_rating: 4,
        cost_category: CostCategory::Medium,
        visa_required: true,
        growth_rate: 1.2,
        coordinates: (23.8859, 45.0792),
    },
    CountrySeed {
        name: "South Korea",
        population: 51_713_000,
        region: Region::EastAsia,
        safety_rating: 5,
        cost_category: CostCategory::Medium,
        visa_required: false,
        growth_rate: 0.1,
        coordinates: (35.9078, 127.7669),
    },
    CountrySeed {
        name: "Thailand",
        population: 71_668_000,
        region: Region::SoutheastAsia,
        safety_rating: 4,
        cost_category: CostCategory::Low,
        visa_required: false,
        growth_rate: 0.3,
        coordinates: (15.8700, 100.9925),
    },
    CountrySeed {
        name: "Vietnam",
        population: 98_858_000,
        region: Region::SoutheastAsia,
        safety_rating: 4,
        cost_category: CostCategory::Low,
        visa_required: true,
        growth_rate: 0.9,
        coordinates: (14.0583, 108.2772),
    },
    CountrySeed {
        name: "Malaysia",
        population: 34_309_000,
        region: Region::SoutheastAsia,
        safety_rating: 4,
        cost_category: CostCategory::Medium,
        visa_required: false,
        growth_rate: 1.1,
        coordinates: (4.2105, 101.9758),
    },
    CountrySeed {
        name: "Singapore",
        population: 6_014_000,
        region: Region::SoutheastAsia,
        safety_rating: 5,
        cost_category: CostCategory::High,
        visa_required: false,
        growth_rate: 0.7,
        coordinates: (1.3521, 103.8198),
    },
    CountrySeed {
        name: "Philippines",
        population: 117_337_000,
        region: Region::SoutheastAsia,
        safety_rating: 3,
        cost_category: CostCategory::Low,
        visa_required: false,
        growth_rate: 1.5,
        coordinates: (12.8797, 121.7740),
    },
    CountrySeed {
        name: "Turkey",
        population: 85_816_000,
        region: Region::EuropeMiddleEast,
        safety_rating: 3,
        cost_category: CostCategory::Medium,
        visa_required: true,
        growth_rate: 0.6,
        coordinates: (38.9637, 35.2433),
    },
];

/// Alias -> canonical name. Matching is case-insensitive after whitespace collapsing.
const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("united states of america", "United States"),
    ("usa", "United States"),
    ("us", "United States"),
    ("u.s.", "United States"),
    ("u.s.a.", "United States"),
    ("america", "United States"),
    ("russian federation", "Russia"),
    ("republic of korea", "South Korea"),
    ("korea, republic of", "South Korea"),
    ("korea", "South Korea"),
    ("people's republic of china", "China"),
    ("prc", "China"),
    ("viet nam", "Vietnam"),
    ("türkiye", "Turkey"),
    ("turkiye", "Turkey"),
    ("republic of the philippines", "Philippines"),
    ("kingdom of saudi arabia", "Saudi Arabia"),
    ("ksa", "Saudi Arabia"),
    ("republic of india", "India"),
    ("arab republic of egypt", "Egypt"),
    ("united mexican states", "Mexico"),
    ("federative republic of brazil", "Brazil"),
];

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Map an inbound display name onto the catalog's canonical spelling.
///
/// Resolution order:
/// 1. a case-insensitive match against a canonical catalog name,
/// 2. a case-insensitive match against the alias table,
/// 3. otherwise the whitespace-collapsed input is returned unchanged.
///
/// Names that fall through step 3 are unknown to the catalog. They keep their own
/// identity in the interaction log but carry no region, cost or population category.
pub fn normalize_country_name(name: &str) -> String {
    let collapsed = collapse_whitespace(name);
    let lowered = collapsed.to_lowercase();

    if let Some(seed) = COUNTRY_SEEDS.iter().find(|seed| seed.name.to_lowercase() == lowered) {
        return seed.name.to_owned();
    }

    if let Some((_, canonical)) = COUNTRY_ALIASES.iter().find(|(alias, _)| *alias == lowered) {
        return (*canonical).to_owned();
    }

    collapsed
}

/// Immutable catalog of country features in seed order
#[derive(Debug, Clone)]
pub struct FeatureCatalog {
    countries: Vec<CountryFeatures>,
    index: HashMap<String, usize>,
}

impl FeatureCatalog {
    /// Build the catalog from the built-in seed table
    pub fn new() -> Self {
        let countries = COUNTRY_SEEDS
            .iter()
            .map(|seed| CountryFeatures {
                name: seed.name.to_owned(),
                population: seed.population,
                population_category: PopulationCategory::from_population(seed.population),
                region: seed.region,
                safety_rating: seed.safety_rating,
                cost_category: seed.cost_category,
                visa_required: seed.visa_required,
                growth_rate: seed.growth_rate,
                coordinates: Coordinates { lat: seed.coordinates.0, lng: seed.coordinates.1 },
            })
            .collect::<Vec<_>>();

        let index = countries
            .iter()
            .enumerate()
            .map(|(position, country)| (country.name.clone(), position))
            .collect();

        Self { countries, index }
    }

    /// Look up a country by canonical name
    pub fn get(&self, name: &str) -> Option<&CountryFeatures> {
        self.index.get(name).map(|position| &self.countries[*position])
    }

    /// Look up a country by any accepted spelling
    pub fn resolve(&self, name: &str) -> Option<&CountryFeatures> {
        self.get(&normalize_country_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All countries in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &CountryFeatures> {
        self.countries.iter()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

impl Default for FeatureCatalog {
    fn default() -> Self {
        Self::new()
    }
}
