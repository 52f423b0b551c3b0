// SPDX-License-Identifier: Apache-2.0

//! TLD to default location mapping used when a builder call gives no
//! country hint.

use crate::countries::{countries, macroregions};
use datacat_model::{Country, Location, UNKNOWN_COUNTRY};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// TLDs whose country is not simply the uppercased TLD label.
const SPECIAL_TLDS: &[(&str, &str)] = &[
    ("gov", "US"),
    ("mil", "US"),
    ("edu", "US"),
    ("uk", "GB"),
    ("eu", "EU"),
];

static TLD_COUNTRIES: Lazy<BTreeMap<String, String>> = Lazy::new(|| {
    let mut out: BTreeMap<String, String> = countries()
        .keys()
        .map(|id| (id.to_ascii_lowercase(), id.clone()))
        .collect();
    for (tld, country) in SPECIAL_TLDS {
        out.insert((*tld).to_string(), (*country).to_string());
    }
    out
});

#[must_use]
pub fn tld_country(tld: &str) -> Option<String> {
    TLD_COUNTRIES.get(&tld.to_ascii_lowercase()).cloned()
}

/// Fallback location when neither hint nor TLD resolves.
#[must_use]
pub fn default_location() -> Location {
    Location::national(Country::new(UNKNOWN_COUNTRY, UNKNOWN_COUNTRY))
}

/// National-level location for a known ISO country, macroregion populated
/// from the reference table. `None` for unknown ids.
#[must_use]
pub fn location_for_country(country_id: &str) -> Option<Location> {
    let name = countries().get(country_id)?;
    let mut loc = Location::national(Country::new(country_id, name.clone()));
    loc.macroregion = macroregions().get(country_id).cloned();
    Some(loc)
}

#[cfg(test)]
mod tests {
    use super::{default_location, location_for_country, tld_country};
    use datacat_model::UNKNOWN_COUNTRY;

    #[test]
    fn gov_maps_to_us() {
        assert_eq!(tld_country("gov").as_deref(), Some("US"));
        assert_eq!(tld_country("GOV").as_deref(), Some("US"));
    }

    #[test]
    fn cctld_maps_to_itself() {
        assert_eq!(tld_country("fr").as_deref(), Some("FR"));
        assert_eq!(tld_country("uk").as_deref(), Some("GB"));
        assert_eq!(tld_country("io"), None);
    }

    #[test]
    fn country_location_is_national_with_macroregion() {
        let loc = location_for_country("US").expect("US location");
        assert_eq!(loc.level, 20);
        assert_eq!(loc.country.name, "United States");
        assert_eq!(loc.macroregion.expect("macroregion").id, "021");
    }

    #[test]
    fn default_location_is_unknown() {
        assert_eq!(default_location().country.id, UNKNOWN_COUNTRY);
    }
}
