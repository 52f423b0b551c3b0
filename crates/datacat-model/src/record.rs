// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

pub const TAG_MIN_LEN: usize = 3;
pub const TAG_MAX_LEN: usize = 40;
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Administrative levels accepted under `coverage[].location.level`.
pub const COVERAGE_LEVELS: [u32; 6] = [10, 20, 30, 40, 50, 60];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CatalogType {
    #[serde(rename = "Open data portal")]
    OpenDataPortal,
    #[serde(rename = "Geoportal")]
    Geoportal,
    #[serde(rename = "Scientific data repository")]
    ScientificDataRepository,
    #[serde(rename = "Indicators catalog")]
    IndicatorsCatalog,
    #[serde(rename = "Microdata catalog")]
    MicrodataCatalog,
    #[serde(rename = "Machine learning catalog")]
    MachineLearningCatalog,
    #[serde(rename = "Data search engine")]
    DataSearchEngine,
    #[serde(rename = "API Catalog")]
    ApiCatalog,
    #[serde(rename = "Data marketplace")]
    DataMarketplace,
    #[serde(rename = "Metadata catalog")]
    MetadataCatalog,
    #[serde(rename = "Other")]
    Other,
}

impl CatalogType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenDataPortal => "Open data portal",
            Self::Geoportal => "Geoportal",
            Self::ScientificDataRepository => "Scientific data repository",
            Self::IndicatorsCatalog => "Indicators catalog",
            Self::MicrodataCatalog => "Microdata catalog",
            Self::MachineLearningCatalog => "Machine learning catalog",
            Self::DataSearchEngine => "Data search engine",
            Self::ApiCatalog => "API Catalog",
            Self::DataMarketplace => "Data marketplace",
            Self::MetadataCatalog => "Metadata catalog",
            Self::Other => "Other",
        }
    }

    pub const ALL: [Self; 11] = [
        Self::OpenDataPortal,
        Self::Geoportal,
        Self::ScientificDataRepository,
        Self::IndicatorsCatalog,
        Self::MicrodataCatalog,
        Self::MachineLearningCatalog,
        Self::DataSearchEngine,
        Self::ApiCatalog,
        Self::DataMarketplace,
        Self::MetadataCatalog,
        Self::Other,
    ];
}

impl Display for CatalogType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ApiStatus {
    Active,
    Inactive,
    Uncertain,
}

impl ApiStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Uncertain => "uncertain",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Active,
    Inactive,
    Scheduled,
    Uncertain,
}

impl RecordStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Scheduled => "scheduled",
            Self::Uncertain => "uncertain",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum AccessMode {
    Open,
    Restricted,
    Paid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ContentType {
    Dataset,
    MapLayer,
    Indicator,
    Microdataset,
    MlModel,
    Document,
    Publication,
    Statistics,
    Geodata,
    Api,
    Timeseries,
    Other,
}

impl ContentType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dataset => "dataset",
            Self::MapLayer => "map_layer",
            Self::Indicator => "indicator",
            Self::Microdataset => "microdataset",
            Self::MlModel => "ml_model",
            Self::Document => "document",
            Self::Publication => "publication",
            Self::Statistics => "statistics",
            Self::Geodata => "geodata",
            Self::Api => "api",
            Self::Timeseries => "timeseries",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OwnerType {
    #[serde(rename = "Central government")]
    CentralGovernment,
    #[serde(rename = "Regional government")]
    RegionalGovernment,
    #[serde(rename = "Local government")]
    LocalGovernment,
    #[serde(rename = "Academy")]
    Academy,
    #[serde(rename = "Business")]
    Business,
    #[serde(rename = "Civil society")]
    CivilSociety,
    #[serde(rename = "Community")]
    Community,
    #[serde(rename = "NGO")]
    Ngo,
    #[serde(rename = "International")]
    International,
}

impl OwnerType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CentralGovernment => "Central government",
            Self::RegionalGovernment => "Regional government",
            Self::LocalGovernment => "Local government",
            Self::Academy => "Academy",
            Self::Business => "Business",
            Self::CivilSociety => "Civil society",
            Self::Community => "Community",
            Self::Ngo => "NGO",
            Self::International => "International",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum RightsType {
    Granular,
    Global,
    Unknown,
    Inapplicable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum TopicType {
    Eudatatheme,
    Iso19115,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct Country {
    pub id: String,
    pub name: String,
}

impl Country {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        self.id != UNKNOWN_COUNTRY && self.id.len() == 2
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct Macroregion {
    pub id: String,
    pub name: String,
}

impl Macroregion {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Shared location shape. `macroregion` is only legal under
/// `coverage[].location`; the quality engine strips it from owner locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub country: Country,
    #[serde(default)]
    pub level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macroregion: Option<Macroregion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
}

impl Location {
    #[must_use]
    pub fn national(country: Country) -> Self {
        Self {
            country,
            level: 20,
            macroregion: None,
            subregion: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Coverage {
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(rename = "type")]
    pub owner_type: OwnerType,
    pub location: Location,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rights {
    pub rights_type: RightsType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tos_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_policy_url: Option<String>,
}

impl Default for RightsType {
    fn default() -> Self {
        Self::Unknown
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct Endpoint {
    #[serde(rename = "type")]
    pub endpoint_type: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Endpoint {
    #[must_use]
    pub fn new(endpoint_type: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            endpoint_type: endpoint_type.into(),
            url: url.into(),
            version: None,
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Identifier {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.id.trim().is_empty()
            && self
                .value
                .as_deref()
                .is_some_and(|v| !v.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct Lang {
    pub id: String,
    pub name: String,
}

impl Lang {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct Topic {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub topic_type: TopicType,
}

impl Topic {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, topic_type: TopicType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            topic_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct SoftwareRef {
    pub id: String,
    pub name: String,
}

impl SoftwareRef {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_national: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_doi: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transferable_location: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrustBreakdown {
    pub owner_type: i32,
    pub catalog_type: i32,
    pub license: i32,
    pub re3data: i32,
    pub extras: i32,
    pub total: i32,
}

/// One data catalog. Field order here is the canonical on-disk YAML order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub name: String,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub catalog_type: CatalogType,
    pub software: SoftwareRef,
    #[serde(default)]
    pub api: bool,
    #[serde(default = "default_api_status")]
    pub api_status: ApiStatus,
    pub access_mode: Vec<AccessMode>,
    pub content_types: Vec<ContentType>,
    pub langs: Vec<Lang>,
    pub coverage: Vec<Coverage>,
    pub owner: Owner,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rights: Option<Rights>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<Endpoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<Identifier>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<Topic>,
    pub status: RecordStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_score: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_breakdown: Option<TrustBreakdown>,
}

const fn default_api_status() -> ApiStatus {
    ApiStatus::Uncertain
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Read-only reference tables the record invariants are checked against.
/// Populated once by `datacat-refdata`; the model never mutates it.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceContext<'a> {
    pub countries: &'a BTreeMap<String, String>,
    pub macroregions: &'a BTreeMap<String, Macroregion>,
    pub software_names: &'a BTreeMap<String, String>,
}

impl CatalogRecord {
    /// Per-record integrity checks from the registry invariants. Corpus-wide
    /// checks (id uniqueness, one national record per country) live with the
    /// store and the quality engine.
    #[must_use]
    pub fn integrity_violations(&self, refs: &ReferenceContext<'_>) -> Vec<Violation> {
        let mut out = Vec::new();

        match refs.software_names.get(&self.software.id) {
            None => out.push(Violation::new(
                "software.id",
                format!("unknown software id '{}'", self.software.id),
            )),
            Some(canonical) if canonical != &self.software.name => out.push(Violation::new(
                "software.name",
                format!(
                    "'{}' does not match canonical name '{canonical}'",
                    self.software.name
                ),
            )),
            Some(_) => {}
        }

        if self.api != !self.endpoints.is_empty() {
            out.push(Violation::new(
                "api",
                "api flag must mirror endpoints presence",
            ));
        }
        if self.api_status == ApiStatus::Active && self.endpoints.is_empty() {
            out.push(Violation::new(
                "api_status",
                "active api_status requires at least one endpoint",
            ));
        }

        if self.access_mode.is_empty() {
            out.push(Violation::new("access_mode", "must not be empty"));
        }
        if self.content_types.is_empty() {
            out.push(Violation::new("content_types", "must not be empty"));
        }
        if self.langs.is_empty() {
            out.push(Violation::new("langs", "must not be empty"));
        }
        if self.coverage.is_empty() {
            out.push(Violation::new("coverage", "must not be empty"));
        }

        if self.catalog_type == CatalogType::Geoportal
            && !self.content_types.contains(&ContentType::MapLayer)
        {
            out.push(Violation::new(
                "content_types",
                "geoportal records must include map_layer",
            ));
        }

        for (i, cov) in self.coverage.iter().enumerate() {
            let loc = &cov.location;
            if !COVERAGE_LEVELS.contains(&loc.level) {
                out.push(Violation::new(
                    format!("coverage[{i}].location.level"),
                    format!("level {} is not one of {:?}", loc.level, COVERAGE_LEVELS),
                ));
            }
            if let Some(canonical) = refs.countries.get(&loc.country.id) {
                if canonical != &loc.country.name {
                    out.push(Violation::new(
                        format!("coverage[{i}].location.country.name"),
                        format!(
                            "'{}' does not match canonical name '{canonical}'",
                            loc.country.name
                        ),
                    ));
                }
                if refs.macroregions.contains_key(&loc.country.id) && loc.macroregion.is_none() {
                    out.push(Violation::new(
                        format!("coverage[{i}].location.macroregion"),
                        "missing macroregion for a known country",
                    ));
                }
            }
        }

        if self.owner.location.macroregion.is_some() {
            out.push(Violation::new(
                "owner.location.macroregion",
                "macroregion is forbidden under owner.location",
            ));
        }
        if let Some(canonical) = refs.countries.get(&self.owner.location.country.id) {
            if canonical != &self.owner.location.country.name {
                out.push(Violation::new(
                    "owner.location.country.name",
                    format!(
                        "'{}' does not match canonical name '{canonical}'",
                        self.owner.location.country.name
                    ),
                ));
            }
        }

        let mut seen = std::collections::BTreeSet::new();
        for (i, tag) in self.tags.iter().enumerate() {
            let folded = tag.to_lowercase();
            if !seen.insert(folded) {
                out.push(Violation::new(
                    format!("tags[{i}]"),
                    format!("case-insensitive duplicate tag '{tag}'"),
                ));
            }
            // Short all-caps tokens (ISO codes, acronyms) are exempt from
            // the minimum-length rule.
            let short_code = tag.len() < TAG_MIN_LEN
                && !tag.is_empty()
                && tag.chars().all(|c| c.is_ascii_uppercase());
            if (tag.len() < TAG_MIN_LEN && !short_code) || tag.len() > TAG_MAX_LEN {
                out.push(Violation::new(
                    format!("tags[{i}]"),
                    format!("tag length must be in [{TAG_MIN_LEN},{TAG_MAX_LEN}]"),
                ));
            }
        }

        for (i, ident) in self.identifiers.iter().enumerate() {
            if !ident.is_complete() {
                out.push(Violation::new(
                    format!("identifiers[{i}]"),
                    "identifier must carry both id and value",
                ));
            }
        }

        if let Some(score) = self.trust_score {
            if !(0..=100).contains(&score) {
                out.push(Violation::new("trust_score", "must be in 0..=100"));
            }
        }

        out
    }

    /// The country bucket this record files under, from its first coverage
    /// entry. `Unknown` when coverage is empty.
    #[must_use]
    pub fn country_bucket(&self) -> String {
        self.coverage
            .first()
            .map(|c| c.location.country.id.clone())
            .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string())
    }
}
