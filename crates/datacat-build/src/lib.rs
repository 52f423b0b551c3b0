// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use datacat_core::{
    host_of, id_from_url, normalize_url, tld_of, PipelineLog, PipelineStage,
};
use datacat_detect::{detect_endpoints, merge_endpoints, ProbeTransport};
use datacat_model::{
    AccessMode, ApiStatus, CatalogRecord, CatalogType, ContentType, Coverage, Lang, Location,
    Owner, OwnerType, RecordStatus, SoftwareRef, UNKNOWN_COUNTRY,
};
use datacat_refdata::{
    country_langs, default_location, lang_name, location_for_country, software_catalog_type,
    software_implies_map_layer, software_name, tld_country,
};
use datacat_store::{RecordStore, StoreError, Tree};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const CRATE_NAME: &str = "datacat-build";

#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub url: String,
    pub software_id: String,
    pub country_hint: Option<String>,
    /// `true` writes to `scheduled/` with status `scheduled`; `false`
    /// writes straight to `entities/` with status `active`.
    pub scheduled: bool,
}

#[derive(Debug, Clone)]
pub enum BuildOutcome {
    Created {
        path: PathBuf,
        record: CatalogRecord,
        events: Vec<datacat_core::PipelineEvent>,
    },
    AlreadyExists {
        id: String,
        path: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BuildError {
    /// Unknown software id aborts the whole operation.
    UnknownSoftware(String),
    InvalidUrl(String),
    Store(StoreError),
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownSoftware(id) => write!(f, "unknown software id '{id}'"),
            Self::InvalidUrl(url) => write!(f, "cannot derive a record from url '{url}'"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for BuildError {}

impl From<StoreError> for BuildError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

/// Synthesise and persist one record. Duplicate URLs, ids, or domains in
/// either tree short-circuit with the existing record's identity.
pub fn build_record(
    request: &BuildRequest,
    store: &RecordStore,
    transport: &dyn ProbeTransport,
) -> Result<BuildOutcome, BuildError> {
    let mut log = PipelineLog::default();
    log.emit_kv(PipelineStage::Prepare, "build.start", "url", &request.url);

    let record_id = id_from_url(&request.url);
    if record_id.is_empty() {
        return Err(BuildError::InvalidUrl(request.url.clone()));
    }
    let software_name = software_name(&request.software_id)
        .ok_or_else(|| BuildError::UnknownSoftware(request.software_id.clone()))?;

    if let Some(existing) = find_duplicate(store, &request.url, &record_id)? {
        tracing::info!(id = %existing.0, "record already exists");
        return Ok(BuildOutcome::AlreadyExists {
            id: existing.0,
            path: existing.1,
        });
    }

    let link = canonical_link(&request.url);
    let bucket = resolve_bucket(request, &link);
    let location = location_for_country(&bucket).unwrap_or_else(default_location);
    let langs = resolve_langs(&location.country.id);
    let catalog_type = software_catalog_type(&request.software_id);

    let mut content_types = vec![ContentType::Dataset];
    if software_implies_map_layer(&request.software_id) {
        content_types.push(ContentType::MapLayer);
    }

    log.emit_kv(
        PipelineStage::Synthesize,
        "build.template",
        "country",
        &location.country.id,
    );

    let mut record = CatalogRecord {
        id: record_id,
        uid: None,
        name: host_of(&link).unwrap_or_else(|| link.clone()),
        link: link.clone(),
        description: None,
        catalog_type,
        software: SoftwareRef::new(&request.software_id, software_name),
        api: false,
        api_status: ApiStatus::Uncertain,
        access_mode: vec![AccessMode::Open],
        content_types,
        langs,
        coverage: vec![Coverage {
            location: location.clone(),
        }],
        owner: Owner {
            name: location.country.name.clone(),
            link: datacat_core::registrable_origin(&link),
            owner_type: OwnerType::CentralGovernment,
            location: Location::national(location.country.clone()),
        },
        rights: None,
        endpoints: Vec::new(),
        identifiers: Vec::new(),
        tags: seed_tags(catalog_type),
        topics: Vec::new(),
        status: if request.scheduled {
            RecordStatus::Scheduled
        } else {
            RecordStatus::Active
        },
        properties: None,
        trust_score: None,
        trust_breakdown: None,
    };

    log.emit_kv(PipelineStage::Detect, "build.detect.begin", "link", &link);
    let outcome = detect_endpoints(&link, &request.software_id, &record.endpoints, transport);
    record.endpoints = merge_endpoints(&record.endpoints, outcome.endpoints);
    record.api = !record.endpoints.is_empty();
    record.api_status = if record.api {
        ApiStatus::Active
    } else {
        ApiStatus::Uncertain
    };
    log.emit_kv(
        PipelineStage::Detect,
        "build.detect.complete",
        "endpoints",
        &record.endpoints.len().to_string(),
    );

    let tree = if request.scheduled {
        Tree::Scheduled
    } else {
        Tree::Entities
    };
    let path = store.save(tree, &record)?;
    log.emit(
        PipelineStage::Persist,
        "build.persisted",
        BTreeMap::from([("path".to_string(), path.display().to_string())]),
    );

    Ok(BuildOutcome::Created {
        path,
        record,
        events: log.into_events(),
    })
}

fn canonical_link(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Duplicate if either tree already holds the same id, the same canonical
/// URL, or the same normalised domain.
fn find_duplicate(
    store: &RecordStore,
    url: &str,
    record_id: &str,
) -> Result<Option<(String, PathBuf)>, StoreError> {
    let wanted_url = normalize_url(url);
    let wanted_domain = wanted_url.split('/').next().unwrap_or(&wanted_url).to_string();
    for tree in Tree::BOTH {
        for item in store.iter(tree) {
            let loaded = item?;
            let existing_url = normalize_url(&loaded.record.link);
            let existing_domain = existing_url
                .split('/')
                .next()
                .unwrap_or(&existing_url)
                .to_string();
            if loaded.record.id == record_id
                || existing_url == wanted_url
                || existing_domain == wanted_domain
            {
                return Ok(Some((loaded.record.id, loaded.path)));
            }
        }
    }
    Ok(None)
}

/// Country hint wins; otherwise the host TLD; otherwise `Unknown`.
fn resolve_bucket(request: &BuildRequest, link: &str) -> String {
    if let Some(hint) = &request.country_hint {
        return hint.clone();
    }
    if let Some(tld) = tld_of(link) {
        if let Some(country) = tld_country(&tld) {
            return country;
        }
    }
    UNKNOWN_COUNTRY.to_string()
}

fn resolve_langs(country_id: &str) -> Vec<Lang> {
    let lang_id = country_langs()
        .get(country_id)
        .map_or("EN", String::as_str);
    let name = lang_name(lang_id).unwrap_or("English");
    vec![Lang::new(lang_id, name)]
}

fn seed_tags(catalog_type: CatalogType) -> Vec<String> {
    let tag = match catalog_type {
        CatalogType::Geoportal => "geospatial",
        CatalogType::ScientificDataRepository => "research data",
        CatalogType::IndicatorsCatalog => "indicators",
        CatalogType::MicrodataCatalog => "microdata",
        CatalogType::MachineLearningCatalog => "machine learning",
        _ => "open data",
    };
    vec![tag.to_string()]
}

#[cfg(test)]
mod tests {
    use super::{canonical_link, resolve_bucket, seed_tags, BuildRequest};
    use datacat_model::CatalogType;

    fn request(url: &str, hint: Option<&str>) -> BuildRequest {
        BuildRequest {
            url: url.to_string(),
            software_id: "ckan".to_string(),
            country_hint: hint.map(str::to_string),
            scheduled: true,
        }
    }

    #[test]
    fn canonical_link_adds_scheme_and_trims_slash() {
        assert_eq!(canonical_link("data.gov/"), "https://data.gov");
        assert_eq!(canonical_link("https://data.gov/"), "https://data.gov");
    }

    #[test]
    fn bucket_prefers_hint_over_tld() {
        assert_eq!(
            resolve_bucket(&request("https://catalog.data.gov", Some("CA")), "https://catalog.data.gov"),
            "CA"
        );
        assert_eq!(
            resolve_bucket(&request("https://catalog.data.gov", None), "https://catalog.data.gov"),
            "US"
        );
        assert_eq!(
            resolve_bucket(&request("https://data.example.io", None), "https://data.example.io"),
            "Unknown"
        );
    }

    #[test]
    fn seed_tags_track_catalog_type() {
        assert_eq!(seed_tags(CatalogType::Geoportal), vec!["geospatial"]);
        assert_eq!(seed_tags(CatalogType::OpenDataPortal), vec!["open data"]);
    }
}
