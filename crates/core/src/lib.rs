pub mod catalog;
pub mod config;
pub mod context;
pub mod errors;
pub mod insights;
pub mod interactions;
pub mod persistence;
pub mod preferences;
pub mod recommendations;
pub mod stats;

pub use catalog::{
    normalize_country_name, CostCategory, CountryFeatures, FeatureCatalog, PopulationCategory,
    Region,
};
pub use context::PersonalizationContext;
pub use errors::{ApplicationError, DomainError};
pub use insights::{generate_smart_insights, SmartInsights};
pub use interactions::{DataTypeViewed, Interaction, InteractionAction, InteractionLog};
pub use persistence::PersistedState;
pub use preferences::{PreferenceUpdate, TravelStyle, UserPreferences, VisaPreference};
pub use recommendations::{Recommendation, RecommendationEngine, RecommendationRequest};
pub use stats::InteractionStats;
