// SPDX-License-Identifier: Apache-2.0

//! Canonical software registry. Record `software.id` must resolve here and
//! `software.name` must equal the canonical name.

use datacat_model::{SoftwareCategory, SoftwareRecord, SupportLevel};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

struct SoftwareSeed {
    id: &'static str,
    name: &'static str,
    category: SoftwareCategory,
    has_api: bool,
    repository_url: Option<&'static str>,
    metadata_support: &'static [(&'static str, SupportLevel)],
}

const SEEDS: &[SoftwareSeed] = &[
    SoftwareSeed {
        id: "ckan",
        name: "CKAN",
        category: SoftwareCategory::OpenSource,
        has_api: true,
        repository_url: Some("https://github.com/ckan/ckan"),
        metadata_support: &[
            ("ckan_api", SupportLevel::Yes),
            ("dcat", SupportLevel::PluginOnly),
            ("schema-org", SupportLevel::PluginOnly),
        ],
    },
    SoftwareSeed {
        id: "arcgishub",
        name: "ArcGIS Hub",
        category: SoftwareCategory::Commercial,
        has_api: true,
        repository_url: None,
        metadata_support: &[
            ("dcat", SupportLevel::Yes),
            ("schema-org", SupportLevel::Yes),
            ("wms", SupportLevel::Yes),
            ("wfs", SupportLevel::Yes),
        ],
    },
    SoftwareSeed {
        id: "opendatasoft",
        name: "OpenDataSoft",
        category: SoftwareCategory::Commercial,
        has_api: true,
        repository_url: None,
        metadata_support: &[("dcat", SupportLevel::Yes), ("wfs", SupportLevel::Yes)],
    },
    SoftwareSeed {
        id: "udata",
        name: "uData",
        category: SoftwareCategory::OpenSource,
        has_api: true,
        repository_url: Some("https://github.com/opendatateam/udata"),
        metadata_support: &[("dcat", SupportLevel::Yes)],
    },
    SoftwareSeed {
        id: "dataverse",
        name: "Dataverse",
        category: SoftwareCategory::OpenSource,
        has_api: true,
        repository_url: Some("https://github.com/IQSS/dataverse"),
        metadata_support: &[
            ("oai-pmh", SupportLevel::Yes),
            ("schema-org", SupportLevel::Yes),
            ("openaire", SupportLevel::Yes),
        ],
    },
    SoftwareSeed {
        id: "geonetwork",
        name: "GeoNetwork",
        category: SoftwareCategory::OpenSource,
        has_api: true,
        repository_url: Some("https://github.com/geonetwork/core-geonetwork"),
        metadata_support: &[
            ("csw", SupportLevel::Yes),
            ("oai-pmh", SupportLevel::Yes),
            ("dcat", SupportLevel::PluginOnly),
        ],
    },
    SoftwareSeed {
        id: "inveniordm",
        name: "InvenioRDM",
        category: SoftwareCategory::OpenSource,
        has_api: true,
        repository_url: Some("https://github.com/inveniosoftware/invenio-app-rdm"),
        metadata_support: &[
            ("oai-pmh", SupportLevel::Yes),
            ("schema-org", SupportLevel::Yes),
        ],
    },
    SoftwareSeed {
        id: "nada",
        name: "NADA",
        category: SoftwareCategory::OpenSource,
        has_api: true,
        repository_url: Some("https://github.com/ihsn/nada"),
        metadata_support: &[("oai-pmh", SupportLevel::Uncertain)],
    },
    SoftwareSeed {
        id: "stac",
        name: "STAC",
        category: SoftwareCategory::OpenSource,
        has_api: true,
        repository_url: Some("https://github.com/radiantearth/stac-spec"),
        metadata_support: &[("stac", SupportLevel::Yes)],
    },
    SoftwareSeed {
        id: "dkan",
        name: "DKAN",
        category: SoftwareCategory::OpenSource,
        has_api: true,
        repository_url: Some("https://github.com/GetDKAN/dkan"),
        metadata_support: &[("ckan_api", SupportLevel::Yes), ("dcat", SupportLevel::Yes)],
    },
    SoftwareSeed {
        id: "dspace",
        name: "DSpace",
        category: SoftwareCategory::OpenSource,
        has_api: true,
        repository_url: Some("https://github.com/DSpace/DSpace"),
        metadata_support: &[
            ("oai-pmh", SupportLevel::Yes),
            ("openaire", SupportLevel::Yes),
        ],
    },
    SoftwareSeed {
        id: "opensdg",
        name: "Open SDG",
        category: SoftwareCategory::OpenSource,
        has_api: true,
        repository_url: Some("https://github.com/open-sdg/open-sdg"),
        metadata_support: &[("sdmx", SupportLevel::PluginOnly)],
    },
    SoftwareSeed {
        id: "ogc",
        name: "OGC endpoint",
        category: SoftwareCategory::Unknown,
        has_api: true,
        repository_url: None,
        metadata_support: &[
            ("csw", SupportLevel::Uncertain),
            ("wms", SupportLevel::Uncertain),
            ("wfs", SupportLevel::Uncertain),
            ("wcs", SupportLevel::Uncertain),
        ],
    },
    SoftwareSeed {
        id: "custom",
        name: "Custom software",
        category: SoftwareCategory::Custom,
        has_api: false,
        repository_url: None,
        metadata_support: &[],
    },
];

static REGISTRY: Lazy<BTreeMap<String, SoftwareRecord>> = Lazy::new(|| {
    SEEDS
        .iter()
        .map(|seed| {
            let mut record = SoftwareRecord::new(seed.id, seed.name, seed.category);
            record.has_api = seed.has_api;
            record.repository_url = seed.repository_url.map(str::to_string);
            record.metadata_support.0 = seed
                .metadata_support
                .iter()
                .map(|(tag, level)| ((*tag).to_string(), *level))
                .collect();
            (seed.id.to_string(), record)
        })
        .collect()
});

static NAMES: Lazy<BTreeMap<String, String>> = Lazy::new(|| {
    REGISTRY
        .iter()
        .map(|(id, record)| (id.clone(), record.name.clone()))
        .collect()
});

#[must_use]
pub fn software_registry() -> &'static BTreeMap<String, SoftwareRecord> {
    &REGISTRY
}

#[must_use]
pub fn software_names() -> &'static BTreeMap<String, String> {
    &NAMES
}

#[must_use]
pub fn software_name(id: &str) -> Option<&'static str> {
    NAMES.get(id).map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::{software_name, software_registry};

    #[test]
    fn canonical_names() {
        assert_eq!(software_name("ckan"), Some("CKAN"));
        assert_eq!(software_name("arcgishub"), Some("ArcGIS Hub"));
        assert_eq!(software_name("drupal"), None);
    }

    #[test]
    fn registry_ids_match_keys() {
        for (id, record) in software_registry() {
            assert_eq!(id, &record.id);
        }
    }
}
