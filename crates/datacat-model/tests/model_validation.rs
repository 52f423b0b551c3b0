// SPDX-License-Identifier: Apache-2.0

use datacat_model::{
    AccessMode, ApiStatus, CatalogRecord, CatalogType, ContentType, Country, Coverage, Endpoint,
    Lang, Location, Macroregion, Owner, OwnerType, RecordStatus, ReferenceContext, SoftwareRef,
};
use std::collections::BTreeMap;

fn tables() -> (BTreeMap<String, String>, BTreeMap<String, Macroregion>, BTreeMap<String, String>) {
    let countries = BTreeMap::from([("US".to_string(), "United States".to_string())]);
    let macroregions = BTreeMap::from([(
        "US".to_string(),
        Macroregion::new("021", "Northern America"),
    )]);
    let software = BTreeMap::from([("ckan".to_string(), "CKAN".to_string())]);
    (countries, macroregions, software)
}

fn record() -> CatalogRecord {
    CatalogRecord {
        id: "catalogdatagov".to_string(),
        uid: None,
        name: "catalog.data.gov".to_string(),
        link: "https://catalog.data.gov".to_string(),
        description: None,
        catalog_type: CatalogType::OpenDataPortal,
        software: SoftwareRef::new("ckan", "CKAN"),
        api: true,
        api_status: ApiStatus::Active,
        access_mode: vec![AccessMode::Open],
        content_types: vec![ContentType::Dataset],
        langs: vec![Lang::new("EN", "English")],
        coverage: vec![Coverage {
            location: Location {
                country: Country::new("US", "United States"),
                level: 20,
                macroregion: Some(Macroregion::new("021", "Northern America")),
                subregion: None,
            },
        }],
        owner: Owner {
            name: "United States".to_string(),
            link: Some("https://data.gov".to_string()),
            owner_type: OwnerType::CentralGovernment,
            location: Location::national(Country::new("US", "United States")),
        },
        rights: None,
        endpoints: vec![Endpoint::new(
            "ckan:package-search",
            "https://catalog.data.gov/api/3/action/package_search",
        )],
        identifiers: vec![],
        tags: vec!["open data".to_string()],
        topics: vec![],
        status: RecordStatus::Active,
        properties: None,
        trust_score: None,
        trust_breakdown: None,
    }
}

#[test]
fn well_formed_record_has_no_violations() {
    let (countries, macroregions, software) = tables();
    let refs = ReferenceContext {
        countries: &countries,
        macroregions: &macroregions,
        software_names: &software,
    };
    assert!(record().integrity_violations(&refs).is_empty());
}

#[test]
fn api_flag_must_match_endpoints() {
    let (countries, macroregions, software) = tables();
    let refs = ReferenceContext {
        countries: &countries,
        macroregions: &macroregions,
        software_names: &software,
    };
    let mut r = record();
    r.endpoints.clear();
    let violations = r.integrity_violations(&refs);
    assert!(violations.iter().any(|v| v.field.contains("api")));
}

#[test]
fn owner_macroregion_is_forbidden() {
    let (countries, macroregions, software) = tables();
    let refs = ReferenceContext {
        countries: &countries,
        macroregions: &macroregions,
        software_names: &software,
    };
    let mut r = record();
    r.owner.location.macroregion = Some(Macroregion::new("155", "Western Europe"));
    let violations = r.integrity_violations(&refs);
    assert!(violations
        .iter()
        .any(|v| v.field == "owner.location.macroregion"));
}

#[test]
fn geoportal_records_must_carry_map_layer() {
    let (countries, macroregions, software) = tables();
    let refs = ReferenceContext {
        countries: &countries,
        macroregions: &macroregions,
        software_names: &software,
    };
    let mut r = record();
    r.catalog_type = CatalogType::Geoportal;
    let violations = r.integrity_violations(&refs);
    assert!(violations.iter().any(|v| v.field == "content_types"));

    r.content_types.push(ContentType::MapLayer);
    assert!(r.integrity_violations(&refs).is_empty());
}

#[test]
fn short_uppercase_tags_are_tolerated() {
    let (countries, macroregions, software) = tables();
    let refs = ReferenceContext {
        countries: &countries,
        macroregions: &macroregions,
        software_names: &software,
    };
    let mut r = record();
    r.tags.push("EU".to_string());
    assert!(r.integrity_violations(&refs).is_empty());

    r.tags.push("eu".to_string());
    let violations = r.integrity_violations(&refs);
    // Lowercase "eu" is both a duplicate and too short.
    assert!(violations.len() >= 2);
}

#[test]
fn yaml_round_trip_preserves_the_record() {
    let original = record();
    let yaml = serde_yaml::to_string(&original).unwrap();
    let reloaded: CatalogRecord = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(original, reloaded);
}

#[test]
fn serialized_field_names_use_wire_spellings() {
    let yaml = serde_yaml::to_string(&record()).unwrap();
    assert!(yaml.contains("catalog_type: Open data portal"));
    assert!(yaml.contains("type: Central government"));
    assert!(yaml.contains("type: ckan:package-search"));
    assert!(!yaml.contains("owner_type:"));
}
