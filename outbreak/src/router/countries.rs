use outbreak_core::{Capability, CountryListItem};

use crate::Outbreak;
use crate::router::macros::outbreak_router_method;

impl Outbreak {
    outbreak_router_method! {
        /// Fetch the country catalog from the first capable connector.
        ///
        /// The catalog is sorted by display name and unique by code.
        method: countries() -> Vec<CountryListItem>,
        accessor: as_countries_provider,
        capability: Capability::Countries,
        call: countries()
    }
}
