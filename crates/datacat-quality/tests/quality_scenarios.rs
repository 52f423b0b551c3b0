// SPDX-License-Identifier: Apache-2.0

use datacat_model::{
    ApiStatus, CatalogRecord, CatalogType, Country, Coverage, Endpoint, Identifier, Lang, Location,
    Macroregion, Owner, OwnerType, Properties, RecordStatus, SoftwareRef, Topic, TopicType,
    AccessMode, ContentType,
};
use datacat_quality::{fix, report, rescore, trust_breakdown, QualityOptions, TrustContext};
use datacat_store::{RecordStore, Tree};
use std::collections::BTreeSet;
use tempfile::TempDir;

fn us_location() -> Location {
    Location {
        country: Country::new("US", "United States"),
        level: 20,
        macroregion: Some(Macroregion::new("021", "Northern America")),
        subregion: None,
    }
}

fn clean_record() -> CatalogRecord {
    CatalogRecord {
        id: "catalogdatagov".to_string(),
        uid: None,
        name: "catalog.data.gov".to_string(),
        link: "https://catalog.data.gov".to_string(),
        description: Some("United States federal open data portal".to_string()),
        catalog_type: CatalogType::OpenDataPortal,
        software: SoftwareRef::new("ckan", "CKAN"),
        api: true,
        api_status: ApiStatus::Active,
        access_mode: vec![AccessMode::Open],
        content_types: vec![ContentType::Dataset],
        langs: vec![Lang::new("EN", "English")],
        coverage: vec![Coverage {
            location: us_location(),
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
        tags: vec!["open data".to_string(), "government".to_string()],
        topics: vec![Topic::new(
            "GOVE",
            "Government and public sector",
            TopicType::Eudatatheme,
        )],
        status: RecordStatus::Active,
        properties: None,
        trust_score: None,
        trust_breakdown: None,
    }
}

#[test]
fn clean_record_is_a_fix_no_op() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path());
    store.save(Tree::Entities, &clean_record()).unwrap();

    let summary = fix(&store, &QualityOptions::default()).unwrap();
    assert_eq!(summary.issues_before, 0);
    assert_eq!(summary.records_changed, 0);
}

#[test]
fn uncertain_api_status_with_endpoints_becomes_active() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path());
    let mut record = clean_record();
    record.api = false;
    record.api_status = ApiStatus::Uncertain;
    let path = store.save(Tree::Entities, &record).unwrap();

    let summary = fix(&store, &QualityOptions::default()).unwrap();
    assert_eq!(summary.records_changed, 1);
    assert!(summary.issues_after < summary.issues_before);

    let repaired = store.load(&path).unwrap();
    assert!(repaired.api);
    assert_eq!(repaired.api_status, ApiStatus::Active);

    // A second pass has nothing left to do.
    let again = fix(&store, &QualityOptions::default()).unwrap();
    assert_eq!(again.issues_before, 0);
    assert_eq!(again.records_changed, 0);
}

#[test]
fn owner_macroregion_is_removed_but_coverage_kept() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path());
    let mut record = clean_record();
    record.owner.location.macroregion = Some(Macroregion::new("155", "Western Europe"));
    let path = store.save(Tree::Entities, &record).unwrap();

    fix(&store, &QualityOptions::default()).unwrap();

    let repaired = store.load(&path).unwrap();
    assert!(repaired.owner.location.macroregion.is_none());
    assert_eq!(
        repaired.coverage[0].location.macroregion,
        Some(Macroregion::new("021", "Northern America"))
    );
}

#[test]
fn duplicate_tags_keep_the_first_spelling() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path());
    let mut record = clean_record();
    record.tags = vec![
        "Open Data".to_string(),
        "open data".to_string(),
        "government".to_string(),
    ];
    let path = store.save(Tree::Entities, &record).unwrap();

    fix(&store, &QualityOptions::default()).unwrap();

    let repaired = store.load(&path).unwrap();
    assert_eq!(repaired.tags, vec!["Open Data", "government"]);
}

#[test]
fn unknown_country_is_inferred_from_the_path() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path());
    let mut record = clean_record();
    record.id = "gabonportal".to_string();
    record.link = "https://data.example.ga".to_string();
    record.coverage[0].location = Location::national(Country::new("Unknown", "Unknown"));
    record.owner.location = Location::national(Country::new("Unknown", "Unknown"));
    record.owner.name = "Unknown".to_string();
    record.owner.link = Some("https://data.example.ga".to_string());

    // File it by hand under GA, the way a curator would.
    let path = dir.path().join("entities/GA/opendata/gabonportal.yaml");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, serde_yaml::to_string(&record).unwrap()).unwrap();

    fix(&store, &QualityOptions::default()).unwrap();

    let repaired = store.load(&path).unwrap();
    let location = &repaired.coverage[0].location;
    assert_eq!(location.country.id, "GA");
    assert_eq!(location.country.name, "Gabon");
    assert_eq!(
        location.macroregion,
        Some(Macroregion::new("202", "Sub-Saharan Africa"))
    );
}

#[test]
fn cross_tree_id_collision_is_reported_not_fixed() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path());
    let record = clean_record();
    store.save(Tree::Entities, &record).unwrap();
    let mut shadow = record.clone();
    shadow.status = RecordStatus::Scheduled;
    store.save(Tree::Scheduled, &shadow).unwrap();

    let found = report(&store, None).unwrap();
    let duplicates: Vec<_> = found
        .issues
        .iter()
        .filter(|i| i.issue_type == datacat_quality::IssueType::DuplicateRecordId)
        .collect();
    assert_eq!(duplicates.len(), 2);

    // No fixer touches it.
    let summary = fix(&store, &QualityOptions::default()).unwrap();
    assert!(summary
        .remaining
        .iter()
        .any(|i| i.issue_type == datacat_quality::IssueType::DuplicateRecordId));
}

#[test]
fn second_national_record_per_country_is_flagged_not_fixed() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path());
    let national = Some(Properties {
        is_national: Some(true),
        ..Properties::default()
    });

    let mut first = clean_record();
    first.properties = national.clone();
    store.save(Tree::Entities, &first).unwrap();

    let mut second = clean_record();
    second.id = "datagov".to_string();
    second.name = "data.gov".to_string();
    second.link = "https://data.gov".to_string();
    second.properties = national.clone();
    store.save(Tree::Entities, &second).unwrap();

    // A retired national record does not count against the country.
    let mut retired = clean_record();
    retired.id = "legacydatagov".to_string();
    retired.link = "https://legacy.data.gov".to_string();
    retired.status = RecordStatus::Inactive;
    retired.properties = national;
    store.save(Tree::Entities, &retired).unwrap();

    let rule = Some(datacat_quality::IssueType::DuplicateNationalRecord);
    let found = report(&store, rule).unwrap();
    assert_eq!(found.issues.len(), 2);
    let ids: Vec<&str> = found.issues.iter().map(|i| i.record_id.as_str()).collect();
    assert!(ids.contains(&"catalogdatagov") && ids.contains(&"datagov"));

    // No fixer touches it.
    let options = QualityOptions {
        rule,
        dry_run: false,
    };
    let summary = fix(&store, &options).unwrap();
    assert_eq!(summary.records_changed, 0);
    assert_eq!(summary.remaining.len(), 2);
}

#[test]
fn missing_owner_link_is_inferred_from_the_record_link() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path());
    let mut record = clean_record();
    record.owner.link = None;
    let path = store.save(Tree::Entities, &record).unwrap();

    fix(&store, &QualityOptions::default()).unwrap();

    let repaired = store.load(&path).unwrap();
    assert_eq!(repaired.owner.link.as_deref(), Some("https://data.gov"));
}

#[test]
fn rule_filter_limits_both_report_and_fix() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path());
    let mut record = clean_record();
    record.api_status = ApiStatus::Uncertain;
    record.api = false;
    record.tags.push("tags".to_string());
    let path = store.save(Tree::Entities, &record).unwrap();

    let options = QualityOptions {
        rule: Some(datacat_quality::IssueType::ApiStatusMismatch),
        dry_run: false,
    };
    let summary = fix(&store, &options).unwrap();
    assert_eq!(summary.issues_before, 1);

    let repaired = store.load(&path).unwrap();
    assert_eq!(repaired.api_status, ApiStatus::Active);
    // The tag placeholder was out of scope and survives.
    assert!(repaired.tags.iter().any(|t| t == "tags"));
}

#[test]
fn dry_run_reports_without_writing() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path());
    let mut record = clean_record();
    record.api_status = ApiStatus::Uncertain;
    record.api = false;
    let path = store.save(Tree::Entities, &record).unwrap();

    let options = QualityOptions {
        rule: None,
        dry_run: true,
    };
    let summary = fix(&store, &options).unwrap();
    assert_eq!(summary.records_changed, 1);

    let untouched = store.load(&path).unwrap();
    assert_eq!(untouched.api_status, ApiStatus::Uncertain);
}

#[test]
fn trust_score_sums_and_persists_a_breakdown() {
    let record = clean_record();
    let breakdown = trust_breakdown(&record, &TrustContext::default());
    assert_eq!(breakdown.owner_type, 35);
    assert_eq!(breakdown.catalog_type, 5);
    assert_eq!(breakdown.license, -15);
    assert_eq!(breakdown.re3data, 0);
    assert_eq!(breakdown.extras, 10);
    assert_eq!(breakdown.total, 35);
}

#[test]
fn re3data_seal_adds_on_top_of_the_identifier() {
    let mut record = clean_record();
    record.identifiers = vec![Identifier {
        id: "re3data".to_string(),
        value: Some("r3d100000001".to_string()),
        url: None,
    }];
    let context = TrustContext {
        re3data_seals: BTreeSet::from(["r3d100000001".to_string()]),
    };
    let breakdown = trust_breakdown(&record, &context);
    assert_eq!(breakdown.re3data, 20);
}

#[test]
fn rescore_writes_scores_back() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path());
    let path = store.save(Tree::Entities, &clean_record()).unwrap();

    let changed = rescore(&store, &TrustContext::default(), false).unwrap();
    assert_eq!(changed, 1);

    let scored = store.load(&path).unwrap();
    assert_eq!(scored.trust_score, Some(35));
    assert_eq!(scored.trust_breakdown.unwrap().total, 35);

    // Idempotent.
    let again = rescore(&store, &TrustContext::default(), false).unwrap();
    assert_eq!(again, 0);
}
