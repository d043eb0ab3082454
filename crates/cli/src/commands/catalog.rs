use geolens_core::catalog::{CountryFeatures, FeatureCatalog};

use crate::commands::CommandResult;

/// Lists the built-in catalog; needs neither config nor database
pub fn run() -> CommandResult {
    let countries: Vec<CountryFeatures> = FeatureCatalog::new().iter().cloned().collect();
    CommandResult::success_with_data("catalog", format!("{} countries", countries.len()), &countries)
}
