// SPDX-License-Identifier: Apache-2.0

use crate::jsonld::{html_has_data_catalog, sitemap_from_robots};
use crate::transport::ProbeTransport;
use datacat_model::Endpoint;
use datacat_refdata::{probes_for, Probe, ProbeVerify};
use serde_json::Value;

pub const SCHEMAORG_ENDPOINT_TYPE: &str = "schemaorg:datacatalog";
pub const SITEMAP_ENDPOINT_TYPE: &str = "sitemap";
/// Legacy endpoint tag whose URL is reused as the probe base for CKAN.
const CKAN_LEGACY_ENDPOINT: &str = "ckanapi";

#[derive(Debug, Clone, Default)]
pub struct DetectOutcome {
    pub endpoints: Vec<Endpoint>,
    /// Probes that did not match, with the reason; informational only.
    pub rejected: Vec<(String, String)>,
}

/// Run the probe catalogue of `software_id` against a record's base URL.
/// Per-probe failures are local: a timeout or bad payload rejects that
/// probe and the walk continues. The record itself is never touched here.
pub fn detect_endpoints(
    link: &str,
    software_id: &str,
    existing: &[Endpoint],
    transport: &dyn ProbeTransport,
) -> DetectOutcome {
    let base = probe_base(link, software_id, existing);
    let base = base.trim_end_matches('/');
    let mut outcome = DetectOutcome::default();

    for probe in probes_for(software_id) {
        let url = probe_url(base, probe.path);
        match try_probe(probe, &url, transport) {
            Ok(()) => {
                let mut endpoint = Endpoint::new(probe.endpoint_type(software_id), url);
                if let Some(version) = probe.version {
                    endpoint = endpoint.with_version(version);
                }
                outcome.endpoints.push(endpoint);
            }
            Err(reason) => {
                tracing::debug!(probe = probe.id, url = %url, %reason, "probe rejected");
                outcome.rejected.push((probe.endpoint_type(software_id), reason));
            }
        }
    }

    detect_root_markers(base, transport, &mut outcome);
    outcome
}

fn probe_base(link: &str, software_id: &str, existing: &[Endpoint]) -> String {
    if software_id == "ckan" {
        if let Some(legacy) = existing
            .iter()
            .find(|e| e.endpoint_type == CKAN_LEGACY_ENDPOINT)
        {
            return legacy.url.clone();
        }
    }
    link.to_string()
}

fn probe_url(base: &str, path: &str) -> String {
    format!("{base}{path}")
}

fn try_probe(
    probe: &Probe,
    url: &str,
    transport: &dyn ProbeTransport,
) -> Result<(), String> {
    let response = transport.fetch(url).map_err(|e| e.to_string())?;
    if response.status != 200 {
        return Err(format!("status {}", response.status));
    }
    let Some(media_type) = response.media_type() else {
        return Err("missing content-type".to_string());
    };
    if !probe.expected_mime.contains(&media_type.as_str()) {
        return Err(format!("unexpected media type '{media_type}'"));
    }
    if probe.is_json {
        let body: Value = serde_json::from_slice(&response.body)
            .map_err(|e| format!("json decode: {e}"))?;
        verify_payload(probe.verify, &body)?;
    }
    Ok(())
}

fn verify_payload(verify: ProbeVerify, body: &Value) -> Result<(), String> {
    match verify {
        ProbeVerify::None => Ok(()),
        ProbeVerify::CkanSuccess => {
            if body.get("success").and_then(Value::as_bool) == Some(true) {
                Ok(())
            } else {
                Err("ckan envelope missing success=true".to_string())
            }
        }
        ProbeVerify::StacCatalog => {
            let is_catalog = body.get("type").and_then(Value::as_str) == Some("Catalog");
            let has_version = body.get("stac_version").is_some();
            if is_catalog && has_version {
                Ok(())
            } else {
                Err("not a STAC catalog landing document".to_string())
            }
        }
        ProbeVerify::JsonObject => body
            .is_object()
            .then_some(())
            .ok_or_else(|| "expected a JSON object".to_string()),
        ProbeVerify::JsonArray => body
            .is_array()
            .then_some(())
            .ok_or_else(|| "expected a JSON array".to_string()),
        ProbeVerify::HasKey(key) => body
            .get(key)
            .map(|_| ())
            .ok_or_else(|| format!("missing top-level key '{key}'")),
    }
}

/// Landing HTML and robots.txt inspection, independent of software family.
fn detect_root_markers(base: &str, transport: &dyn ProbeTransport, outcome: &mut DetectOutcome) {
    match transport.fetch(base) {
        Ok(response) if response.status == 200 => {
            let is_html = response
                .media_type()
                .is_some_and(|m| m == "text/html" || m == "application/xhtml+xml");
            if is_html {
                let body = String::from_utf8_lossy(&response.body);
                if html_has_data_catalog(&body) {
                    outcome
                        .endpoints
                        .push(Endpoint::new(SCHEMAORG_ENDPOINT_TYPE, base));
                }
            }
        }
        Ok(_) | Err(_) => {}
    }

    let robots_url = format!("{base}/robots.txt");
    if let Ok(response) = transport.fetch(&robots_url) {
        if response.status == 200 {
            let body = String::from_utf8_lossy(&response.body);
            if let Some(sitemap) = sitemap_from_robots(&body) {
                outcome
                    .endpoints
                    .push(Endpoint::new(SITEMAP_ENDPOINT_TYPE, sitemap));
            }
        }
    }
}

/// Merge detected endpoints into an existing list. Existing entries keep
/// their order; new entries append in detection order; `(type, url)` pairs
/// never duplicate, so running the detector twice is a no-op.
#[must_use]
pub fn merge_endpoints(existing: &[Endpoint], detected: Vec<Endpoint>) -> Vec<Endpoint> {
    let mut out: Vec<Endpoint> = existing.to_vec();
    for candidate in detected {
        let dup = out
            .iter()
            .any(|e| e.endpoint_type == candidate.endpoint_type && e.url == candidate.url);
        if !dup {
            out.push(candidate);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{detect_endpoints, merge_endpoints};
    use crate::transport::{ProbeResponse, StubTransport};
    use datacat_model::Endpoint;

    #[test]
    fn ckan_probe_matches_on_success_envelope() {
        let transport = StubTransport::new().with(
            "https://catalog.data.gov/api/3/action/package_search",
            ProbeResponse::ok(
                "application/json;charset=utf-8",
                br#"{"success": true, "result": {"count": 1}}"#.to_vec(),
            ),
        );
        let outcome = detect_endpoints("https://catalog.data.gov", "ckan", &[], &transport);
        assert!(outcome
            .endpoints
            .iter()
            .any(|e| e.endpoint_type == "ckan:package-search"
                && e.url == "https://catalog.data.gov/api/3/action/package_search"));
    }

    #[test]
    fn ckan_probe_rejects_failed_envelope_and_wrong_mime() {
        let transport = StubTransport::new()
            .with(
                "https://a.gov/api/3/action/package_search",
                ProbeResponse::ok("application/json", br#"{"success": false}"#.to_vec()),
            )
            .with(
                "https://a.gov/api/3/action/status_show",
                ProbeResponse::ok("text/html", b"<html></html>".to_vec()),
            );
        let outcome = detect_endpoints("https://a.gov", "ckan", &[], &transport);
        assert!(outcome.endpoints.is_empty());
        assert_eq!(outcome.rejected.len(), 2);
    }

    #[test]
    fn ckan_reuses_legacy_ckanapi_endpoint_base() {
        let existing = vec![Endpoint::new("ckanapi", "https://a.gov/data")];
        let transport = StubTransport::new().with(
            "https://a.gov/data/api/3/action/package_search",
            ProbeResponse::ok("application/json", br#"{"success": true}"#.to_vec()),
        );
        let outcome = detect_endpoints("https://a.gov", "ckan", &existing, &transport);
        assert!(outcome
            .endpoints
            .iter()
            .any(|e| e.url == "https://a.gov/data/api/3/action/package_search"));
    }

    #[test]
    fn stac_probe_requires_catalog_type_and_version() {
        let good = StubTransport::new().with(
            "https://stac.example.org/",
            ProbeResponse::ok(
                "application/json",
                br#"{"type":"Catalog","stac_version":"1.0.0"}"#.to_vec(),
            ),
        );
        let outcome = detect_endpoints("https://stac.example.org/", "stac", &[], &good);
        assert!(outcome.endpoints.iter().any(|e| e.endpoint_type == "stac"));

        let bad = StubTransport::new().with(
            "https://stac.example.org/",
            ProbeResponse::ok("application/json", br#"{"type":"FeatureCollection"}"#.to_vec()),
        );
        let outcome = detect_endpoints("https://stac.example.org/", "stac", &[], &bad);
        assert!(outcome.endpoints.is_empty());
    }

    #[test]
    fn root_markers_surface_schemaorg_and_sitemap() {
        let html = r#"<script type="application/ld+json">{"@type":"DataCatalog"}</script>"#;
        let transport = StubTransport::new()
            .with("https://portal.example.org", ProbeResponse::ok("text/html", html.as_bytes().to_vec()))
            .with(
                "https://portal.example.org/robots.txt",
                ProbeResponse::ok(
                    "text/plain",
                    b"Sitemap: https://portal.example.org/sitemap.xml".to_vec(),
                ),
            );
        let outcome = detect_endpoints("https://portal.example.org/", "custom", &[], &transport);
        let types: Vec<&str> = outcome
            .endpoints
            .iter()
            .map(|e| e.endpoint_type.as_str())
            .collect();
        assert!(types.contains(&"schemaorg:datacatalog"));
        assert!(types.contains(&"sitemap"));
    }

    #[test]
    fn merge_is_idempotent_and_order_stable() {
        let existing = vec![Endpoint::new("ckan:package-search", "https://a.gov/api")];
        let detected = vec![
            Endpoint::new("ckan:package-search", "https://a.gov/api"),
            Endpoint::new("sitemap", "https://a.gov/sitemap.xml"),
        ];
        let merged = merge_endpoints(&existing, detected.clone());
        assert_eq!(merged.len(), 2);
        let again = merge_endpoints(&merged, detected);
        assert_eq!(again, merged);
    }
}
