// SPDX-License-Identifier: Apache-2.0

//! Fixed probe catalogue per software family. A probe is data only; the
//! detector in `datacat-detect` executes it.

/// How a JSON body is checked beyond decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeVerify {
    /// No body check beyond MIME (and JSON decode when `is_json`).
    None,
    /// CKAN action API envelope: top-level `success == true`.
    CkanSuccess,
    /// STAC landing document: `type == "Catalog"` and `stac_version` present.
    StacCatalog,
    /// Body must decode to a JSON object.
    JsonObject,
    /// Body must decode to a JSON array.
    JsonArray,
    /// Body must be a JSON object carrying this top-level key.
    HasKey(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Probe {
    /// Probe id; endpoint type becomes `<family>:<id>`, or just `<family>`
    /// when empty.
    pub id: &'static str,
    pub path: &'static str,
    pub expected_mime: &'static [&'static str],
    pub is_json: bool,
    pub verify: ProbeVerify,
    pub version: Option<&'static str>,
}

impl Probe {
    #[must_use]
    pub fn endpoint_type(&self, family: &str) -> String {
        if self.id.is_empty() {
            family.to_string()
        } else {
            format!("{family}:{}", self.id)
        }
    }
}

const JSON_MIMES: &[&str] = &["application/json", "text/json", "application/ld+json"];
const XML_MIMES: &[&str] = &["text/xml", "application/xml", "application/vnd.ogc.wms_xml"];

const fn json_probe(id: &'static str, path: &'static str, verify: ProbeVerify) -> Probe {
    Probe {
        id,
        path,
        expected_mime: JSON_MIMES,
        is_json: true,
        verify,
        version: None,
    }
}

const fn xml_probe(id: &'static str, path: &'static str) -> Probe {
    Probe {
        id,
        path,
        expected_mime: XML_MIMES,
        is_json: false,
        verify: ProbeVerify::None,
        version: None,
    }
}

const CKAN_PROBES: &[Probe] = &[
    json_probe(
        "package-search",
        "/api/3/action/package_search",
        ProbeVerify::CkanSuccess,
    ),
    json_probe(
        "status-show",
        "/api/3/action/status_show",
        ProbeVerify::CkanSuccess,
    ),
];

const ARCGISHUB_PROBES: &[Probe] = &[
    Probe {
        id: "dcat-ap",
        path: "/api/feed/dcat-ap/2.0.1.json",
        expected_mime: JSON_MIMES,
        is_json: true,
        verify: ProbeVerify::JsonObject,
        version: Some("2.0.1"),
    },
    Probe {
        id: "dcat-us",
        path: "/api/feed/dcat-us/1.1.json",
        expected_mime: JSON_MIMES,
        is_json: true,
        verify: ProbeVerify::JsonObject,
        version: Some("1.1"),
    },
    Probe {
        id: "rss",
        path: "/api/feed/rss/2.0",
        expected_mime: &["application/rss+xml", "text/xml", "application/xml"],
        is_json: false,
        verify: ProbeVerify::None,
        version: Some("2.0"),
    },
    json_probe("search", "/api/search/v1", ProbeVerify::JsonObject),
];

const OPENDATASOFT_PROBES: &[Probe] =
    &[json_probe("api", "/api", ProbeVerify::JsonObject)];

const UDATA_PROBES: &[Probe] = &[
    json_probe("site", "/api/1/site/", ProbeVerify::JsonObject),
    json_probe("datasets", "/api/1/datasets/?page_size=1", ProbeVerify::JsonObject),
];

const DATAVERSE_PROBES: &[Probe] = &[
    json_probe("version", "/api/info/version", ProbeVerify::HasKey("data")),
    json_probe("search", "/api/search?q=*", ProbeVerify::HasKey("data")),
];

const GEONETWORK_PROBES: &[Probe] = &[
    json_probe("site", "/srv/api/site", ProbeVerify::JsonObject),
    xml_probe("csw", "/srv/eng/csw?service=CSW&request=GetCapabilities"),
];

const INVENIORDM_PROBES: &[Probe] =
    &[json_probe("records", "/api/records", ProbeVerify::HasKey("hits"))];

const NADA_PROBES: &[Probe] = &[
    json_probe("catalog-search", "/index.php/api/catalog/search", ProbeVerify::JsonObject),
    json_probe("catalog-search-root", "/api/catalog/search", ProbeVerify::JsonObject),
];

const STAC_PROBES: &[Probe] = &[json_probe("", "/", ProbeVerify::StacCatalog)];

const DKAN_PROBES: &[Probe] = &[
    json_probe("data-json", "/data.json", ProbeVerify::JsonObject),
    json_probe("package-search", "/api/3/action/package_search", ProbeVerify::CkanSuccess),
];

const DSPACE_PROBES: &[Probe] = &[
    json_probe("server-api", "/server/api", ProbeVerify::JsonObject),
    json_probe("rest-api", "/rest/api", ProbeVerify::JsonObject),
];

const OPENSDG_PROBES: &[Probe] =
    &[json_probe("indicators", "/api/v1/indicators.json", ProbeVerify::JsonArray)];

const OGC_PROBES: &[Probe] = &[
    xml_probe("csw", "?service=CSW&request=GetCapabilities"),
    xml_probe("wms", "?service=WMS&request=GetCapabilities"),
    xml_probe("wfs", "?service=WFS&request=GetCapabilities"),
    xml_probe("wcs", "?service=WCS&request=GetCapabilities"),
];

#[must_use]
pub fn probes_for(software_id: &str) -> &'static [Probe] {
    match software_id {
        "ckan" => CKAN_PROBES,
        "arcgishub" => ARCGISHUB_PROBES,
        "opendatasoft" => OPENDATASOFT_PROBES,
        "udata" => UDATA_PROBES,
        "dataverse" => DATAVERSE_PROBES,
        "geonetwork" => GEONETWORK_PROBES,
        "inveniordm" => INVENIORDM_PROBES,
        "nada" => NADA_PROBES,
        "stac" => STAC_PROBES,
        "dkan" => DKAN_PROBES,
        "dspace" => DSPACE_PROBES,
        "opensdg" => OPENSDG_PROBES,
        "ogc" => OGC_PROBES,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::{probes_for, Probe};

    #[test]
    fn ckan_package_search_probe_path() {
        let probes = probes_for("ckan");
        let search = probes
            .iter()
            .find(|p| p.id == "package-search")
            .expect("probe");
        assert_eq!(search.path, "/api/3/action/package_search");
        assert_eq!(search.endpoint_type("ckan"), "ckan:package-search");
    }

    #[test]
    fn stac_root_probe_has_family_only_type() {
        let probe: &Probe = &probes_for("stac")[0];
        assert_eq!(probe.endpoint_type("stac"), "stac");
    }

    #[test]
    fn unknown_family_has_no_probes() {
        assert!(probes_for("wordpress").is_empty());
    }
}
