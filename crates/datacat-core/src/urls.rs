// SPDX-License-Identifier: Apache-2.0

use url::Url;

/// Canonical form used for record ids and duplicate comparison: no scheme,
/// no leading `www.`, lowercase host, no trailing slash, no query/fragment.
#[must_use]
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_scheme = match trimmed.split_once("://") {
        Some((scheme, rest))
            if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") =>
        {
            rest
        }
        _ => trimmed,
    };
    let without_suffix = without_scheme
        .split(['#', '?'])
        .next()
        .unwrap_or(without_scheme);
    let (host, path) = match without_suffix.split_once('/') {
        Some((h, p)) => (h, Some(p)),
        None => (without_suffix, None),
    };
    let host = host.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
    let mut out = host;
    if let Some(p) = path {
        let p = p.trim_end_matches('/');
        if !p.is_empty() {
            out.push('/');
            out.push_str(p);
        }
    }
    out.trim_end_matches('/').to_string()
}

/// Record id derived from a URL: the normalized host with punctuation
/// stripped, e.g. `https://catalog.data.gov` -> `catalogdatagov`.
#[must_use]
pub fn id_from_url(raw: &str) -> String {
    let normalized = normalize_url(raw);
    let host = normalized.split('/').next().unwrap_or(&normalized);
    host.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Lowercased host of an absolute URL, `www.` kept as-is.
#[must_use]
pub fn host_of(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw.trim()).ok()?;
    parsed.host_str().map(str::to_ascii_lowercase)
}

/// Last dot-separated label of the host, e.g. `gov` for `catalog.data.gov`.
#[must_use]
pub fn tld_of(raw: &str) -> Option<String> {
    let host = host_of(raw)?;
    host.rsplit('.').next().map(str::to_string)
}

/// Second-level labels that act as public suffixes under a two-letter
/// country TLD, e.g. `gouv.fr`, `co.uk`, `go.jp`.
const SECOND_LEVEL_SUFFIXES: &[&str] =
    &["ac", "co", "com", "edu", "go", "gouv", "gov", "net", "or", "org"];

/// `https://<registrable domain>` for the host of `raw`; subdomains are
/// dropped, so `https://catalog.data.gov/x` becomes `https://data.gov`.
/// Used to infer owner links.
#[must_use]
pub fn registrable_origin(raw: &str) -> Option<String> {
    let host = host_of(raw)?;
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let labels: Vec<&str> = host.split('.').collect();
    let take = match labels.as_slice() {
        [.., second, tld]
            if labels.len() > 2 && tld.len() == 2 && SECOND_LEVEL_SUFFIXES.contains(second) =>
        {
            3
        }
        _ if labels.len() > 1 => 2,
        _ => 1,
    };
    let domain = labels[labels.len() - take..].join(".");
    Some(format!("https://{domain}"))
}

#[cfg(test)]
mod tests {
    use super::{host_of, id_from_url, normalize_url, registrable_origin, tld_of};

    #[test]
    fn normalize_strips_scheme_www_and_trailing_slash() {
        assert_eq!(normalize_url("https://www.Data.Gov/"), "data.gov");
        assert_eq!(normalize_url("http://data.gov"), "data.gov");
        assert_eq!(normalize_url("data.gov/"), "data.gov");
    }

    #[test]
    fn normalize_drops_query_and_fragment() {
        assert_eq!(
            normalize_url("https://data.gov/dataset?page=2#top"),
            "data.gov/dataset"
        );
    }

    #[test]
    fn normalize_preserves_path_case() {
        assert_eq!(
            normalize_url("https://Example.ORG/Open/Data/"),
            "example.org/Open/Data"
        );
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_url("https://www.catalog.data.gov/path/?q=1");
        assert_eq!(normalize_url(&once), once);
    }

    #[test]
    fn id_strips_punctuation() {
        assert_eq!(id_from_url("https://catalog.data.gov"), "catalogdatagov");
        assert_eq!(id_from_url("https://open-data.example.org/"), "opendataexampleorg");
    }

    #[test]
    fn host_and_tld() {
        assert_eq!(host_of("https://catalog.data.gov/x"), Some("catalog.data.gov".to_string()));
        assert_eq!(tld_of("https://catalog.data.gov"), Some("gov".to_string()));
        assert_eq!(host_of("not a url"), None);
    }

    #[test]
    fn origin_drops_www_and_path() {
        assert_eq!(
            registrable_origin("https://www.data.gouv.fr/fr/datasets"),
            Some("https://data.gouv.fr".to_string())
        );
    }

    #[test]
    fn origin_drops_subdomains() {
        assert_eq!(
            registrable_origin("https://catalog.data.gov/dataset"),
            Some("https://data.gov".to_string())
        );
        assert_eq!(
            registrable_origin("https://data.gov.uk"),
            Some("https://data.gov.uk".to_string())
        );
        assert_eq!(
            registrable_origin("https://open.data.go.jp/"),
            Some("https://data.go.jp".to_string())
        );
    }
}
