// SPDX-License-Identifier: Apache-2.0

use datacat_compile::{compile, CATALOG_TYPES_TSV, FULL_JSONL, MARKDOWN_DIR, SOFTWARE_TSV};
use datacat_model::{
    AccessMode, ApiStatus, CatalogRecord, CatalogType, ContentType, Country, Coverage, Lang,
    Location, Macroregion, Owner, OwnerType, RecordStatus, SoftwareRef,
};
use datacat_store::{RecordStore, Tree};
use tempfile::TempDir;

fn record(id: &str, name: &str, link: &str, catalog_type: CatalogType) -> CatalogRecord {
    CatalogRecord {
        id: id.to_string(),
        uid: Some(format!("cdi{id}")),
        name: name.to_string(),
        link: link.to_string(),
        description: None,
        catalog_type,
        software: SoftwareRef::new("ckan", "CKAN"),
        api: false,
        api_status: ApiStatus::Uncertain,
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
        endpoints: vec![],
        identifiers: vec![],
        tags: vec!["open data".to_string()],
        topics: vec![],
        status: RecordStatus::Active,
        properties: None,
        trust_score: None,
        trust_breakdown: None,
    }
}

fn seed(store: &RecordStore) {
    store
        .save(
            Tree::Entities,
            &record(
                "catalogdatagov",
                "catalog.data.gov",
                "https://catalog.data.gov",
                CatalogType::OpenDataPortal,
            ),
        )
        .unwrap();
    store
        .save(
            Tree::Entities,
            &record(
                "geoplatformgov",
                "geoplatform.gov",
                "https://geoplatform.gov",
                CatalogType::Geoportal,
            ),
        )
        .unwrap();
    // Scheduled records never compile.
    store
        .save(
            Tree::Scheduled,
            &record(
                "pendingexample",
                "pending.example.org",
                "https://pending.example.org",
                CatalogType::OpenDataPortal,
            ),
        )
        .unwrap();
}

#[test]
fn compiles_entities_only_in_path_order() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path().join("registry"));
    seed(&store);
    let out = dir.path().join("dist");

    let report = compile(&store, &out).unwrap();
    assert_eq!(report.records, 2);
    assert_eq!(report.markdown_pages, 2);

    let jsonl = std::fs::read_to_string(out.join(FULL_JSONL)).unwrap();
    let lines: Vec<&str> = jsonl.lines().collect();
    assert_eq!(lines.len(), 2);
    // Geoportal record sorts first because `geo/` precedes `opendata/`.
    assert!(lines[0].contains("\"geoplatformgov\""));
    assert!(lines[1].contains("\"catalogdatagov\""));
    assert!(!jsonl.contains("pendingexample"));

    assert!(out.join(MARKDOWN_DIR).join("cdicatalogdatagov.md").is_file());
}

#[test]
fn rerun_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path().join("registry"));
    seed(&store);

    let out_a = dir.path().join("a");
    let out_b = dir.path().join("b");
    let report_a = compile(&store, &out_a).unwrap();
    let report_b = compile(&store, &out_b).unwrap();

    assert_eq!(report_a.corpus_sha256, report_b.corpus_sha256);
    for file in [FULL_JSONL, SOFTWARE_TSV, CATALOG_TYPES_TSV] {
        assert_eq!(
            std::fs::read(out_a.join(file)).unwrap(),
            std::fs::read(out_b.join(file)).unwrap(),
            "{file} differs between runs"
        );
    }
}

#[test]
fn summary_tables_count_and_percent() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::new(dir.path().join("registry"));
    seed(&store);
    let out = dir.path().join("dist");
    compile(&store, &out).unwrap();

    let software = std::fs::read_to_string(out.join(SOFTWARE_TSV)).unwrap();
    assert_eq!(software, "key\tcount\tpercent\nCKAN\t2\t100.0\n");

    let types = std::fs::read_to_string(out.join(CATALOG_TYPES_TSV)).unwrap();
    assert!(types.contains("Geoportal\t1\t50.0"));
    assert!(types.contains("Open data portal\t1\t50.0"));
}
