// SPDX-License-Identifier: Apache-2.0

//! Country, macroregion (UN M49 aggregate), and primary-language tables.
//! Loaded once; never mutated at runtime.

use datacat_model::Macroregion;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// `(iso_alpha2, name, macroregion_id, primary_lang_id)`
const COUNTRY_ROWS: &[(&str, &str, &str, &str)] = &[
    // Northern Africa
    ("DZ", "Algeria", "015", "AR"),
    ("EG", "Egypt", "015", "AR"),
    ("LY", "Libya", "015", "AR"),
    ("MA", "Morocco", "015", "AR"),
    ("SD", "Sudan", "015", "AR"),
    ("TN", "Tunisia", "015", "AR"),
    // Sub-Saharan Africa
    ("AO", "Angola", "202", "PT"),
    ("BJ", "Benin", "202", "FR"),
    ("BW", "Botswana", "202", "EN"),
    ("BF", "Burkina Faso", "202", "FR"),
    ("BI", "Burundi", "202", "FR"),
    ("CM", "Cameroon", "202", "FR"),
    ("CV", "Cabo Verde", "202", "PT"),
    ("CF", "Central African Republic", "202", "FR"),
    ("TD", "Chad", "202", "FR"),
    ("KM", "Comoros", "202", "AR"),
    ("CG", "Congo", "202", "FR"),
    ("CD", "Democratic Republic of the Congo", "202", "FR"),
    ("CI", "Côte d'Ivoire", "202", "FR"),
    ("DJ", "Djibouti", "202", "FR"),
    ("GQ", "Equatorial Guinea", "202", "ES"),
    ("ER", "Eritrea", "202", "EN"),
    ("SZ", "Eswatini", "202", "EN"),
    ("ET", "Ethiopia", "202", "AM"),
    ("GA", "Gabon", "202", "FR"),
    ("GM", "Gambia", "202", "EN"),
    ("GH", "Ghana", "202", "EN"),
    ("GN", "Guinea", "202", "FR"),
    ("GW", "Guinea-Bissau", "202", "PT"),
    ("KE", "Kenya", "202", "SW"),
    ("LS", "Lesotho", "202", "EN"),
    ("LR", "Liberia", "202", "EN"),
    ("MG", "Madagascar", "202", "FR"),
    ("MW", "Malawi", "202", "EN"),
    ("ML", "Mali", "202", "FR"),
    ("MR", "Mauritania", "202", "AR"),
    ("MU", "Mauritius", "202", "EN"),
    ("MZ", "Mozambique", "202", "PT"),
    ("NA", "Namibia", "202", "EN"),
    ("NE", "Niger", "202", "FR"),
    ("NG", "Nigeria", "202", "EN"),
    ("RW", "Rwanda", "202", "RW"),
    ("ST", "Sao Tome and Principe", "202", "PT"),
    ("SN", "Senegal", "202", "FR"),
    ("SC", "Seychelles", "202", "EN"),
    ("SL", "Sierra Leone", "202", "EN"),
    ("SO", "Somalia", "202", "SO"),
    ("ZA", "South Africa", "202", "EN"),
    ("SS", "South Sudan", "202", "EN"),
    ("TZ", "Tanzania", "202", "SW"),
    ("TG", "Togo", "202", "FR"),
    ("UG", "Uganda", "202", "EN"),
    ("ZM", "Zambia", "202", "EN"),
    ("ZW", "Zimbabwe", "202", "EN"),
    // Northern America
    ("US", "United States", "021", "EN"),
    ("CA", "Canada", "021", "EN"),
    ("BM", "Bermuda", "021", "EN"),
    ("GL", "Greenland", "021", "DA"),
    // Latin America and the Caribbean
    ("AR", "Argentina", "419", "ES"),
    ("BB", "Barbados", "419", "EN"),
    ("BO", "Bolivia", "419", "ES"),
    ("BR", "Brazil", "419", "PT"),
    ("BS", "Bahamas", "419", "EN"),
    ("BZ", "Belize", "419", "EN"),
    ("CL", "Chile", "419", "ES"),
    ("CO", "Colombia", "419", "ES"),
    ("CR", "Costa Rica", "419", "ES"),
    ("CU", "Cuba", "419", "ES"),
    ("DO", "Dominican Republic", "419", "ES"),
    ("EC", "Ecuador", "419", "ES"),
    ("SV", "El Salvador", "419", "ES"),
    ("GT", "Guatemala", "419", "ES"),
    ("GY", "Guyana", "419", "EN"),
    ("HT", "Haiti", "419", "FR"),
    ("HN", "Honduras", "419", "ES"),
    ("JM", "Jamaica", "419", "EN"),
    ("MX", "Mexico", "419", "ES"),
    ("NI", "Nicaragua", "419", "ES"),
    ("PA", "Panama", "419", "ES"),
    ("PY", "Paraguay", "419", "ES"),
    ("PE", "Peru", "419", "ES"),
    ("SR", "Suriname", "419", "NL"),
    ("TT", "Trinidad and Tobago", "419", "EN"),
    ("UY", "Uruguay", "419", "ES"),
    ("VE", "Venezuela", "419", "ES"),
    // Central Asia
    ("KZ", "Kazakhstan", "143", "KK"),
    ("KG", "Kyrgyzstan", "143", "KY"),
    ("TJ", "Tajikistan", "143", "TG"),
    ("TM", "Turkmenistan", "143", "TK"),
    ("UZ", "Uzbekistan", "143", "UZ"),
    // Eastern Asia
    ("CN", "China", "030", "ZH"),
    ("HK", "Hong Kong", "030", "ZH"),
    ("JP", "Japan", "030", "JA"),
    ("KP", "North Korea", "030", "KO"),
    ("KR", "South Korea", "030", "KO"),
    ("MN", "Mongolia", "030", "MN"),
    ("MO", "Macao", "030", "ZH"),
    ("TW", "Taiwan", "030", "ZH"),
    // South-eastern Asia
    ("BN", "Brunei Darussalam", "035", "MS"),
    ("KH", "Cambodia", "035", "KM"),
    ("ID", "Indonesia", "035", "ID"),
    ("LA", "Lao People's Democratic Republic", "035", "LO"),
    ("MY", "Malaysia", "035", "MS"),
    ("MM", "Myanmar", "035", "MY"),
    ("PH", "Philippines", "035", "EN"),
    ("SG", "Singapore", "035", "EN"),
    ("TH", "Thailand", "035", "TH"),
    ("TL", "Timor-Leste", "035", "PT"),
    ("VN", "Viet Nam", "035", "VI"),
    // Southern Asia
    ("AF", "Afghanistan", "034", "PS"),
    ("BD", "Bangladesh", "034", "BN"),
    ("BT", "Bhutan", "034", "DZ"),
    ("IN", "India", "034", "HI"),
    ("IR", "Iran", "034", "FA"),
    ("LK", "Sri Lanka", "034", "SI"),
    ("MV", "Maldives", "034", "DV"),
    ("NP", "Nepal", "034", "NE"),
    ("PK", "Pakistan", "034", "UR"),
    // Western Asia
    ("AE", "United Arab Emirates", "145", "AR"),
    ("AM", "Armenia", "145", "HY"),
    ("AZ", "Azerbaijan", "145", "AZ"),
    ("BH", "Bahrain", "145", "AR"),
    ("CY", "Cyprus", "145", "EL"),
    ("GE", "Georgia", "145", "KA"),
    ("IL", "Israel", "145", "HE"),
    ("IQ", "Iraq", "145", "AR"),
    ("JO", "Jordan", "145", "AR"),
    ("KW", "Kuwait", "145", "AR"),
    ("LB", "Lebanon", "145", "AR"),
    ("OM", "Oman", "145", "AR"),
    ("PS", "Palestine", "145", "AR"),
    ("QA", "Qatar", "145", "AR"),
    ("SA", "Saudi Arabia", "145", "AR"),
    ("SY", "Syrian Arab Republic", "145", "AR"),
    ("TR", "Türkiye", "145", "TR"),
    ("YE", "Yemen", "145", "AR"),
    // Eastern Europe
    ("BG", "Bulgaria", "151", "BG"),
    ("BY", "Belarus", "151", "BE"),
    ("CZ", "Czechia", "151", "CS"),
    ("HU", "Hungary", "151", "HU"),
    ("MD", "Moldova", "151", "RO"),
    ("PL", "Poland", "151", "PL"),
    ("RO", "Romania", "151", "RO"),
    ("RU", "Russia", "151", "RU"),
    ("SK", "Slovakia", "151", "SK"),
    ("UA", "Ukraine", "151", "UK"),
    // Northern Europe
    ("DK", "Denmark", "154", "DA"),
    ("EE", "Estonia", "154", "ET"),
    ("FI", "Finland", "154", "FI"),
    ("GB", "United Kingdom", "154", "EN"),
    ("IE", "Ireland", "154", "EN"),
    ("IS", "Iceland", "154", "IS"),
    ("LT", "Lithuania", "154", "LT"),
    ("LV", "Latvia", "154", "LV"),
    ("NO", "Norway", "154", "NO"),
    ("SE", "Sweden", "154", "SV"),
    // Southern Europe
    ("AD", "Andorra", "039", "CA"),
    ("AL", "Albania", "039", "SQ"),
    ("BA", "Bosnia and Herzegovina", "039", "BS"),
    ("ES", "Spain", "039", "ES"),
    ("GR", "Greece", "039", "EL"),
    ("HR", "Croatia", "039", "HR"),
    ("IT", "Italy", "039", "IT"),
    ("ME", "Montenegro", "039", "SR"),
    ("MK", "North Macedonia", "039", "MK"),
    ("MT", "Malta", "039", "MT"),
    ("PT", "Portugal", "039", "PT"),
    ("RS", "Serbia", "039", "SR"),
    ("SI", "Slovenia", "039", "SL"),
    ("SM", "San Marino", "039", "IT"),
    ("VA", "Holy See", "039", "IT"),
    // Western Europe
    ("AT", "Austria", "155", "DE"),
    ("BE", "Belgium", "155", "NL"),
    ("CH", "Switzerland", "155", "DE"),
    ("DE", "Germany", "155", "DE"),
    ("FR", "France", "155", "FR"),
    ("LI", "Liechtenstein", "155", "DE"),
    ("LU", "Luxembourg", "155", "FR"),
    ("MC", "Monaco", "155", "FR"),
    ("NL", "Netherlands", "155", "NL"),
    // Australia and New Zealand
    ("AU", "Australia", "053", "EN"),
    ("NZ", "New Zealand", "053", "EN"),
    // Melanesia
    ("FJ", "Fiji", "054", "EN"),
    ("PG", "Papua New Guinea", "054", "EN"),
    ("SB", "Solomon Islands", "054", "EN"),
    ("VU", "Vanuatu", "054", "EN"),
    // Micronesia
    ("FM", "Micronesia", "057", "EN"),
    ("KI", "Kiribati", "057", "EN"),
    ("MH", "Marshall Islands", "057", "EN"),
    ("NR", "Nauru", "057", "EN"),
    ("PW", "Palau", "057", "EN"),
    // Polynesia
    ("TO", "Tonga", "061", "EN"),
    ("TV", "Tuvalu", "061", "EN"),
    ("WS", "Samoa", "061", "EN"),
];

const MACROREGION_NAMES: &[(&str, &str)] = &[
    ("015", "Northern Africa"),
    ("202", "Sub-Saharan Africa"),
    ("021", "Northern America"),
    ("419", "Latin America and the Caribbean"),
    ("143", "Central Asia"),
    ("030", "Eastern Asia"),
    ("035", "South-eastern Asia"),
    ("034", "Southern Asia"),
    ("145", "Western Asia"),
    ("151", "Eastern Europe"),
    ("154", "Northern Europe"),
    ("039", "Southern Europe"),
    ("155", "Western Europe"),
    ("053", "Australia and New Zealand"),
    ("054", "Melanesia"),
    ("057", "Micronesia"),
    ("061", "Polynesia"),
];

const LANG_NAMES: &[(&str, &str)] = &[
    ("AM", "Amharic"),
    ("AR", "Arabic"),
    ("AZ", "Azerbaijani"),
    ("BE", "Belarusian"),
    ("BG", "Bulgarian"),
    ("BN", "Bengali"),
    ("BS", "Bosnian"),
    ("CA", "Catalan"),
    ("CS", "Czech"),
    ("DA", "Danish"),
    ("DE", "German"),
    ("DV", "Divehi"),
    ("DZ", "Dzongkha"),
    ("EL", "Greek"),
    ("EN", "English"),
    ("ES", "Spanish"),
    ("ET", "Estonian"),
    ("FA", "Persian"),
    ("FI", "Finnish"),
    ("FR", "French"),
    ("HE", "Hebrew"),
    ("HI", "Hindi"),
    ("HR", "Croatian"),
    ("HU", "Hungarian"),
    ("HY", "Armenian"),
    ("ID", "Indonesian"),
    ("IS", "Icelandic"),
    ("IT", "Italian"),
    ("JA", "Japanese"),
    ("KA", "Georgian"),
    ("KK", "Kazakh"),
    ("KM", "Khmer"),
    ("KO", "Korean"),
    ("KY", "Kyrgyz"),
    ("LO", "Lao"),
    ("LT", "Lithuanian"),
    ("LV", "Latvian"),
    ("MK", "Macedonian"),
    ("MN", "Mongolian"),
    ("MS", "Malay"),
    ("MT", "Maltese"),
    ("MY", "Burmese"),
    ("NE", "Nepali"),
    ("NL", "Dutch"),
    ("NO", "Norwegian"),
    ("PL", "Polish"),
    ("PS", "Pashto"),
    ("PT", "Portuguese"),
    ("RO", "Romanian"),
    ("RU", "Russian"),
    ("RW", "Kinyarwanda"),
    ("SI", "Sinhala"),
    ("SK", "Slovak"),
    ("SL", "Slovenian"),
    ("SO", "Somali"),
    ("SQ", "Albanian"),
    ("SR", "Serbian"),
    ("SV", "Swedish"),
    ("SW", "Swahili"),
    ("TG", "Tajik"),
    ("TH", "Thai"),
    ("TK", "Turkmen"),
    ("TR", "Turkish"),
    ("UK", "Ukrainian"),
    ("UR", "Urdu"),
    ("UZ", "Uzbek"),
    ("VI", "Vietnamese"),
    ("ZH", "Chinese"),
];

/// Non-country buckets allowed as the top path segment of a record tree.
pub const COUNTRY_BUCKETS: [&str; 9] = [
    "Federal",
    "EU",
    "World",
    "Unknown",
    "Africa",
    "ASEAN",
    "Caribbean",
    "LatinAmerica",
    "Oceania",
];

static COUNTRIES: Lazy<BTreeMap<String, String>> = Lazy::new(|| {
    COUNTRY_ROWS
        .iter()
        .map(|(id, name, _, _)| ((*id).to_string(), (*name).to_string()))
        .collect()
});

static MACROREGIONS: Lazy<BTreeMap<String, Macroregion>> = Lazy::new(|| {
    let names: BTreeMap<&str, &str> = MACROREGION_NAMES.iter().copied().collect();
    COUNTRY_ROWS
        .iter()
        .map(|(id, _, region_id, _)| {
            let name = names.get(region_id).copied().unwrap_or("Unknown");
            ((*id).to_string(), Macroregion::new(*region_id, name))
        })
        .collect()
});

static COUNTRY_LANGS: Lazy<BTreeMap<String, String>> = Lazy::new(|| {
    COUNTRY_ROWS
        .iter()
        .map(|(id, _, _, lang)| ((*id).to_string(), (*lang).to_string()))
        .collect()
});

static LANGS: Lazy<BTreeMap<String, String>> = Lazy::new(|| {
    LANG_NAMES
        .iter()
        .map(|(id, name)| ((*id).to_string(), (*name).to_string()))
        .collect()
});

#[must_use]
pub fn countries() -> &'static BTreeMap<String, String> {
    &COUNTRIES
}

#[must_use]
pub fn macroregions() -> &'static BTreeMap<String, Macroregion> {
    &MACROREGIONS
}

#[must_use]
pub fn country_langs() -> &'static BTreeMap<String, String> {
    &COUNTRY_LANGS
}

#[must_use]
pub fn lang_name(id: &str) -> Option<&'static str> {
    LANGS.get(id).map(String::as_str)
}

#[must_use]
pub fn is_country_bucket(segment: &str) -> bool {
    COUNTRY_BUCKETS.contains(&segment) || COUNTRIES.contains_key(segment)
}

#[cfg(test)]
mod tests {
    use super::{countries, country_langs, macroregions};

    #[test]
    fn every_country_has_macroregion_and_lang() {
        for id in countries().keys() {
            assert!(macroregions().contains_key(id), "macroregion missing for {id}");
            assert!(country_langs().contains_key(id), "lang missing for {id}");
        }
    }

    #[test]
    fn known_macroregion_assignments() {
        assert_eq!(macroregions()["US"].id, "021");
        assert_eq!(macroregions()["US"].name, "Northern America");
        assert_eq!(macroregions()["GA"].id, "202");
        assert_eq!(macroregions()["GA"].name, "Sub-Saharan Africa");
        assert_eq!(countries()["GA"], "Gabon");
    }
}
