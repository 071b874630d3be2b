use outbreak_core::CountryListItem;

/// (name, iso2, iso3)
const CATALOG: &[(&str, Option<&str>, &str)] = &[
    ("Brazil", Some("BR"), "BRA"),
    ("France", Some("FR"), "FRA"),
    ("Germany", Some("DE"), "DEU"),
    ("India", Some("IN"), "IND"),
    ("Italy", Some("IT"), "ITA"),
    ("Japan", Some("JP"), "JPN"),
    ("Kosovo", None, "XKX"),
    ("South Africa", Some("ZA"), "ZAF"),
    ("UK", Some("GB"), "GBR"),
    ("USA", Some("US"), "USA"),
];

pub fn all() -> Vec<CountryListItem> {
    CATALOG
        .iter()
        .map(|&(name, iso2, iso3)| CountryListItem {
            name: name.to_string(),
            code: iso2.unwrap_or(iso3).to_string(),
            iso2: iso2.map(str::to_string),
            iso3: Some(iso3.to_string()),
            flag_url: Some(format!(
                "https://disease.sh/assets/img/flags/{}.png",
                iso2.unwrap_or(iso3).to_ascii_lowercase()
            )),
        })
        .collect()
}

/// Resolvable by code but left out of the catalog.
const HIDDEN: &[(&str, &str)] = &[("Slowland", "SLOW")];

pub fn by_code(code: &str) -> Option<CountryListItem> {
    if let Some(&(name, hidden)) = HIDDEN.iter().find(|(_, c)| *c == code) {
        return Some(CountryListItem::new(name, hidden));
    }
    all()
        .into_iter()
        .find(|c| c.code.eq_ignore_ascii_case(code) || c.iso3.as_deref() == Some(code))
}
