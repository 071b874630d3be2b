use std::sync::Arc;

use outbreak_core::OutbreakConnector;
use outbreak_core::{CountryListItem, OutbreakError, Selection};

/// Return a connector for demos.
///
/// Set `OUTBREAK_DEMOS_USE_MOCK` to use fixture data instead of the live API.
///
/// # Errors
/// Returns an error if the HTTP client cannot be built.
pub fn get_connector() -> Result<Arc<dyn OutbreakConnector>, OutbreakError> {
    if std::env::var("OUTBREAK_DEMOS_USE_MOCK").is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        Ok(Arc::new(outbreak_mock::MockConnector::new()))
    } else {
        let config = outbreak_disease_sh::DiseaseShConfig::default()
            .with_timeout(std::time::Duration::from_secs(20));
        Ok(Arc::new(outbreak_disease_sh::DiseaseShConnector::try_new(
            &config,
        )?))
    }
}

/// Build a selection from `(name, code)` pairs.
///
/// # Errors
/// Returns `InvalidArg` for more than eight countries or a repeated code.
pub fn selection_of(countries: &[(&str, &str)]) -> Result<Selection, OutbreakError> {
    Selection::try_from_items(
        countries
            .iter()
            .map(|&(name, code)| CountryListItem::new(name, code)),
    )
}
