// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Protocol tags a software record may declare support for.
pub const KNOWN_PROTOCOL_TAGS: [&str; 13] = [
    "ckan_api",
    "dcat",
    "csw",
    "oai-pmh",
    "stac",
    "wms",
    "wfs",
    "wcs",
    "sdmx",
    "schema-org",
    "openaire",
    "opensearch",
    "sparql",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SupportLevel {
    #[serde(rename = "Yes")]
    Yes,
    #[serde(rename = "No")]
    No,
    #[serde(rename = "Plugin only")]
    PluginOnly,
    #[serde(rename = "Uncertain")]
    Uncertain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SoftwareCategory {
    OpenSource,
    Commercial,
    Custom,
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[non_exhaustive]
pub struct MetadataSupport(pub BTreeMap<String, SupportLevel>);

impl MetadataSupport {
    #[must_use]
    pub fn unknown_tags(&self) -> Vec<String> {
        self.0
            .keys()
            .filter(|k| !KNOWN_PROTOCOL_TAGS.contains(&k.as_str()))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftwareRecord {
    pub id: String,
    pub name: String,
    pub category: SoftwareCategory,
    #[serde(default)]
    pub has_api: bool,
    #[serde(default)]
    pub has_bulk: bool,
    #[serde(default)]
    pub datatypes: Vec<String>,
    #[serde(default)]
    pub pid_support: bool,
    #[serde(default)]
    pub rights_management: bool,
    #[serde(default)]
    pub metadata_support: MetadataSupport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub export_formats: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<String>,
}

impl SoftwareRecord {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: SoftwareCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            has_api: false,
            has_bulk: false,
            datatypes: Vec::new(),
            pid_support: false,
            rights_management: false,
            metadata_support: MetadataSupport::default(),
            version: None,
            repository_url: None,
            documentation_url: None,
            export_formats: Vec::new(),
            capabilities: Vec::new(),
        }
    }
}
