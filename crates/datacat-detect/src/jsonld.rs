// SPDX-License-Identifier: Apache-2.0

//! Landing-page inspection for embedded schema.org JSON-LD. A page attests
//! a catalog when any `<script type="application/ld+json">` block carries
//! `@type: DataCatalog`, directly or inside `@graph`/`mainEntity`, whether
//! the node is an object or a list.

use serde_json::Value;

#[must_use]
pub fn html_has_data_catalog(html: &str) -> bool {
    extract_ld_json_blocks(html)
        .iter()
        .filter_map(|block| serde_json::from_str::<Value>(block).ok())
        .any(|doc| value_attests_data_catalog(&doc))
}

fn extract_ld_json_blocks(html: &str) -> Vec<String> {
    let mut out = Vec::new();
    let lower = html.to_ascii_lowercase();
    let mut cursor = 0;
    while let Some(open_rel) = lower[cursor..].find("<script") {
        let open = cursor + open_rel;
        let Some(tag_end_rel) = lower[open..].find('>') else {
            break;
        };
        let tag_end = open + tag_end_rel + 1;
        let tag = &lower[open..tag_end];
        let Some(close_rel) = lower[tag_end..].find("</script") else {
            break;
        };
        let close = tag_end + close_rel;
        if tag.contains("application/ld+json") {
            out.push(html[tag_end..close].to_string());
        }
        cursor = close + 1;
    }
    out
}

fn value_attests_data_catalog(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().any(value_attests_data_catalog),
        Value::Object(map) => {
            if type_is_data_catalog(map.get("@type")) {
                return true;
            }
            map.get("@graph").is_some_and(value_attests_data_catalog)
                || map.get("mainEntity").is_some_and(value_attests_data_catalog)
        }
        _ => false,
    }
}

fn type_is_data_catalog(type_value: Option<&Value>) -> bool {
    match type_value {
        Some(Value::String(s)) => s == "DataCatalog",
        Some(Value::Array(items)) => items
            .iter()
            .any(|v| v.as_str() == Some("DataCatalog")),
        _ => false,
    }
}

/// First `Sitemap:` reference from a robots.txt body.
#[must_use]
pub fn sitemap_from_robots(body: &str) -> Option<String> {
    body.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        if key.trim().eq_ignore_ascii_case("sitemap") {
            let v = value.trim();
            (!v.is_empty()).then(|| v.to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{html_has_data_catalog, sitemap_from_robots};

    #[test]
    fn detects_direct_data_catalog() {
        let html = r#"<html><head><script type="application/ld+json">
            {"@context":"https://schema.org","@type":"DataCatalog","name":"x"}
        </script></head></html>"#;
        assert!(html_has_data_catalog(html));
    }

    #[test]
    fn detects_catalog_inside_graph_list() {
        let html = r#"<script type="application/ld+json">
            {"@graph":[{"@type":"WebSite"},{"@type":["Thing","DataCatalog"]}]}
        </script>"#;
        assert!(html_has_data_catalog(html));
    }

    #[test]
    fn detects_catalog_under_main_entity() {
        let html = r#"<script type="application/ld+json">
            {"@type":"WebPage","mainEntity":{"@type":"DataCatalog"}}
        </script>"#;
        assert!(html_has_data_catalog(html));
    }

    #[test]
    fn ignores_other_types_and_plain_scripts() {
        let html = r#"<script type="application/ld+json">{"@type":"NewsArticle"}</script>
                      <script>var dataCatalog = "DataCatalog";</script>"#;
        assert!(!html_has_data_catalog(html));
    }

    #[test]
    fn robots_sitemap_line() {
        let robots = "User-agent: *\nDisallow: /admin\nSitemap: https://x.org/sitemap.xml\n";
        assert_eq!(
            sitemap_from_robots(robots).as_deref(),
            Some("https://x.org/sitemap.xml")
        );
        assert_eq!(sitemap_from_robots("User-agent: *\n"), None);
    }
}
