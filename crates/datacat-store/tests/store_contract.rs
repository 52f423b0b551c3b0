use datacat_model::{
    AccessMode, ApiStatus, CatalogRecord, CatalogType, ContentType, Country, Coverage, Lang,
    Location, Owner, OwnerType, RecordStatus, SoftwareRef,
};
use datacat_store::{record_path, RecordStore, StoreErrorCode, Tree};
use std::fs;

fn sample_record() -> CatalogRecord {
    CatalogRecord {
        id: "catalogdatagov".to_string(),
        uid: None,
        name: "Data.gov".to_string(),
        link: "https://catalog.data.gov".to_string(),
        description: None,
        catalog_type: CatalogType::OpenDataPortal,
        software: SoftwareRef::new("ckan", "CKAN"),
        api: false,
        api_status: ApiStatus::Uncertain,
        access_mode: vec![AccessMode::Open],
        content_types: vec![ContentType::Dataset],
        langs: vec![Lang::new("EN", "English")],
        coverage: vec![Coverage {
            location: Location::national(Country::new("US", "United States")),
        }],
        owner: Owner {
            name: "General Services Administration".to_string(),
            link: Some("https://www.gsa.gov".to_string()),
            owner_type: OwnerType::CentralGovernment,
            location: Location::national(Country::new("US", "United States")),
        },
        rights: None,
        endpoints: Vec::new(),
        identifiers: Vec::new(),
        tags: vec!["government".to_string(), "open data".to_string()],
        topics: Vec::new(),
        status: RecordStatus::Active,
        properties: None,
        trust_score: None,
        trust_breakdown: None,
    }
}

#[test]
fn save_uses_country_and_kind_layout() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = RecordStore::new(dir.path());
    let record = sample_record();

    let path = store.save(Tree::Entities, &record).expect("save");
    assert_eq!(
        path,
        dir.path()
            .join("entities")
            .join("US")
            .join("opendata")
            .join("catalogdatagov.yaml")
    );
    assert_eq!(path, record_path(dir.path(), Tree::Entities, &record));
}

#[test]
fn load_save_round_trip_is_identity() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = RecordStore::new(dir.path());
    let record = sample_record();

    let path = store.save(Tree::Scheduled, &record).expect("save");
    let loaded = store.load(&path).expect("load");
    assert_eq!(loaded, record);
}

#[test]
fn malformed_yaml_reports_filename() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = RecordStore::new(dir.path());
    let bad = dir
        .path()
        .join("entities")
        .join("US")
        .join("opendata")
        .join("broken.yaml");
    fs::create_dir_all(bad.parent().expect("parent")).expect("mkdir");
    fs::write(&bad, "id: [unterminated").expect("write");

    let err = store.load(&bad).expect_err("must fail");
    assert_eq!(err.code, StoreErrorCode::CorruptYaml);
    assert!(err.message.contains("broken.yaml"));
}

#[test]
fn find_by_url_normalizes_and_prefers_entities() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = RecordStore::new(dir.path());
    store.save(Tree::Entities, &sample_record()).expect("save");

    let hit = store
        .find_by_url("http://www.catalog.data.gov/")
        .expect("scan")
        .expect("match");
    assert_eq!(hit.record.id, "catalogdatagov");

    assert!(store
        .find_by_url("https://data.gouv.fr")
        .expect("scan")
        .is_none());
}

#[test]
fn cross_tree_duplicates_are_surfaced() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = RecordStore::new(dir.path());
    let record = sample_record();
    store.save(Tree::Entities, &record).expect("save entities");
    store.save(Tree::Scheduled, &record).expect("save scheduled");

    let dupes = store.cross_tree_duplicates().expect("scan");
    assert_eq!(dupes, vec!["catalogdatagov".to_string()]);
}

#[test]
fn iter_walks_in_path_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = RecordStore::new(dir.path());

    let mut a = sample_record();
    a.id = "zportal".to_string();
    a.link = "https://zportal.example.gov".to_string();
    let mut b = sample_record();
    b.id = "aportal".to_string();
    b.link = "https://aportal.example.gov".to_string();
    store.save(Tree::Entities, &a).expect("save");
    store.save(Tree::Entities, &b).expect("save");

    let ids: Vec<String> = store
        .iter(Tree::Entities)
        .map(|r| r.expect("load").record.id)
        .collect();
    assert_eq!(ids, vec!["aportal".to_string(), "zportal".to_string()]);
}
