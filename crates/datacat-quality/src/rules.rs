// SPDX-License-Identifier: Apache-2.0

//! Pure defect predicates. Each rule inspects one record (or, for the
//! corpus rules, the whole loaded set) and yields zero or more issues.

use crate::issue::{Issue, IssueType};
use datacat_model::{ApiStatus, CatalogRecord, RecordStatus, TAG_MAX_LEN, TAG_MIN_LEN};
use datacat_refdata::{countries, macroregions, software_names};
use datacat_store::LoadedRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;

static OWNER_URL_RE: Lazy<Regex> = Lazy::new(|| {
    // Absolute http(s) URL or a bare registrable domain.
    Regex::new(r"^(?:https?://)?[A-Za-z0-9][A-Za-z0-9.-]*\.[A-Za-z]{2,}(?:/\S*)?$")
        .unwrap_or_else(|e| panic!("owner url pattern: {e}"))
});

/// Tags that carry no information and get dropped on repair.
pub(crate) const PLACEHOLDER_TAGS: &[&str] = &["tag", "tags", "todo", "test", "none", "n/a", "misc"];

pub(crate) fn is_placeholder_tag(tag: &str) -> bool {
    PLACEHOLDER_TAGS.contains(&tag.trim().to_ascii_lowercase().as_str())
}

pub(crate) fn is_short_code(tag: &str) -> bool {
    tag.len() < TAG_MIN_LEN && !tag.is_empty() && tag.chars().all(|c| c.is_ascii_uppercase())
}

/// Run every per-record rule.
#[must_use]
pub fn record_issues(record: &CatalogRecord, path: &Path) -> Vec<Issue> {
    let mut out = Vec::new();
    owner_url_rule(record, path, &mut out);
    api_status_rule(record, path, &mut out);
    license_rule(record, path, &mut out);
    tag_rules(record, path, &mut out);
    identifier_rule(record, path, &mut out);
    geography_rules(record, path, &mut out);
    presence_rules(record, path, &mut out);
    software_rules(record, path, &mut out);
    out
}

fn owner_url_rule(record: &CatalogRecord, path: &Path, out: &mut Vec<Issue>) {
    if let Some(link) = &record.owner.link {
        if !OWNER_URL_RE.is_match(link.trim()) {
            out.push(
                Issue::new(
                    &record.id,
                    path,
                    IssueType::InvalidOwnerUrl,
                    "owner.link",
                    "replace with an absolute URL or drop the field",
                )
                .with_value(link.clone()),
            );
        }
    }
}

fn api_status_rule(record: &CatalogRecord, path: &Path, out: &mut Vec<Issue>) {
    let has_endpoints = !record.endpoints.is_empty();
    let consistent = record.api == has_endpoints
        && (record.api_status != ApiStatus::Active || has_endpoints)
        && (!has_endpoints || record.api_status == ApiStatus::Active);
    if !consistent {
        out.push(
            Issue::new(
                &record.id,
                path,
                IssueType::ApiStatusMismatch,
                "api_status",
                if has_endpoints {
                    "set api=true and api_status=active"
                } else {
                    "set api=false and api_status=uncertain"
                },
            )
            .with_value(record.api_status.as_str()),
        );
    }
}

fn license_rule(record: &CatalogRecord, path: &Path, out: &mut Vec<Issue>) {
    if let Some(rights) = &record.rights {
        let id = rights.license_id.as_deref().is_some_and(|v| !v.is_empty());
        let url = rights.license_url.as_deref().is_some_and(|v| !v.is_empty());
        if id != url {
            out.push(Issue::new(
                &record.id,
                path,
                IssueType::InconsistentLicense,
                if id { "rights.license_url" } else { "rights.license_id" },
                "populate the missing license field or drop both",
            ));
        }
    }
}

fn tag_rules(record: &CatalogRecord, path: &Path, out: &mut Vec<Issue>) {
    let mut seen = std::collections::BTreeSet::new();
    for (i, tag) in record.tags.iter().enumerate() {
        if !seen.insert(tag.to_lowercase()) {
            out.push(
                Issue::new(
                    &record.id,
                    path,
                    IssueType::DuplicateTags,
                    format!("tags[{i}]"),
                    "drop later case-insensitive duplicates",
                )
                .with_value(tag.clone()),
            );
            continue;
        }
        let too_short = tag.len() < TAG_MIN_LEN && !is_short_code(tag);
        if tag.trim().is_empty() || too_short || tag.len() > TAG_MAX_LEN || is_placeholder_tag(tag)
        {
            out.push(
                Issue::new(
                    &record.id,
                    path,
                    IssueType::TagHygiene,
                    format!("tags[{i}]"),
                    "drop empty, placeholder, or out-of-length tags",
                )
                .with_value(tag.clone()),
            );
        }
    }
}

fn identifier_rule(record: &CatalogRecord, path: &Path, out: &mut Vec<Issue>) {
    for (i, ident) in record.identifiers.iter().enumerate() {
        if !ident.is_complete() {
            out.push(
                Issue::new(
                    &record.id,
                    path,
                    IssueType::IncompleteIdentifier,
                    format!("identifiers[{i}]"),
                    "supply both id and value or drop the identifier",
                )
                .with_value(ident.id.clone()),
            );
        }
    }
}

fn geography_rules(record: &CatalogRecord, path: &Path, out: &mut Vec<Issue>) {
    let path_country = path
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .find(|segment| countries().contains_key(*segment));

    for (i, coverage) in record.coverage.iter().enumerate() {
        let country = &coverage.location.country;
        let Some(expected_name) = countries().get(&country.id) else {
            // Filed under a country directory but claiming an unknown
            // country: the directory wins.
            if let Some(inferred) = path_country {
                out.push(
                    Issue::new(
                        &record.id,
                        path,
                        IssueType::MissingMacroregion,
                        format!("coverage[{i}].location"),
                        format!("infer country '{inferred}' from the record's path"),
                    )
                    .with_value(country.id.clone()),
                );
            }
            continue;
        };
        if &country.name != expected_name {
            out.push(
                Issue::new(
                    &record.id,
                    path,
                    IssueType::CountryNameMismatch,
                    format!("coverage[{i}].location.country.name"),
                    format!("rename to '{expected_name}'"),
                )
                .with_value(country.name.clone()),
            );
        }
        let expected_macroregion = macroregions().get(&country.id);
        let actual = coverage.location.macroregion.as_ref();
        if expected_macroregion.is_some() && actual != expected_macroregion {
            out.push(Issue::new(
                &record.id,
                path,
                IssueType::MissingMacroregion,
                format!("coverage[{i}].location.macroregion"),
                "backfill from the macroregion table",
            ));
        }
    }

    let owner_country = &record.owner.location.country;
    if let Some(expected_name) = countries().get(&owner_country.id) {
        if &owner_country.name != expected_name {
            out.push(
                Issue::new(
                    &record.id,
                    path,
                    IssueType::CountryNameMismatch,
                    "owner.location.country.name",
                    format!("rename to '{expected_name}'"),
                )
                .with_value(owner_country.name.clone()),
            );
        }
    }
    if let Some(region) = &record.owner.location.macroregion {
        out.push(
            Issue::new(
                &record.id,
                path,
                IssueType::OwnerLocationHasMacroregion,
                "owner.location.macroregion",
                "remove; owner locations never carry a macroregion",
            )
            .with_value(region.id.clone()),
        );
    }
}

fn presence_rules(record: &CatalogRecord, path: &Path, out: &mut Vec<Issue>) {
    if record.owner.link.is_none() {
        out.push(Issue::new(
            &record.id,
            path,
            IssueType::MissingOwnerLink,
            "owner.link",
            "infer https://<registrable-domain> from link",
        ));
    }
    if record.tags.is_empty() {
        out.push(Issue::new(
            &record.id,
            path,
            IssueType::MissingTags,
            "tags",
            "synthesise from catalog_type, software, and coverage",
        ));
    }
    if record.topics.is_empty() {
        out.push(Issue::new(
            &record.id,
            path,
            IssueType::MissingTopics,
            "topics",
            "map catalog_type and description keywords to themes",
        ));
    }
}

fn software_rules(record: &CatalogRecord, path: &Path, out: &mut Vec<Issue>) {
    match software_names().get(&record.software.id) {
        None => out.push(
            Issue::new(
                &record.id,
                path,
                IssueType::InvalidSoftwareId,
                "software.id",
                "use a registered software id",
            )
            .with_value(record.software.id.clone()),
        ),
        Some(expected) if expected != &record.software.name => out.push(
            Issue::new(
                &record.id,
                path,
                IssueType::SoftwareNameMismatch,
                "software.name",
                format!("rename to '{expected}'"),
            )
            .with_value(record.software.name.clone()),
        ),
        Some(_) => {}
    }
}

/// Rules that only make sense over the whole loaded corpus: id collisions
/// across trees and more than one national record per country.
#[must_use]
pub fn corpus_issues(records: &[LoadedRecord]) -> Vec<Issue> {
    let mut out = Vec::new();

    let mut by_id: BTreeMap<&str, Vec<&LoadedRecord>> = BTreeMap::new();
    for loaded in records {
        by_id.entry(&loaded.record.id).or_default().push(loaded);
    }
    for (id, group) in &by_id {
        if group.len() > 1 {
            for loaded in group {
                out.push(
                    Issue::new(
                        id,
                        &loaded.path,
                        IssueType::DuplicateRecordId,
                        "id",
                        "resolve by renaming or removing one of the records",
                    )
                    .with_value(loaded.path.display().to_string()),
                );
            }
        }
    }

    let mut national: BTreeMap<String, Vec<&LoadedRecord>> = BTreeMap::new();
    for loaded in records {
        let is_national = loaded
            .record
            .properties
            .as_ref()
            .and_then(|p| p.is_national)
            .unwrap_or(false);
        if is_national && loaded.record.status != RecordStatus::Inactive {
            national
                .entry(loaded.record.country_bucket())
                .or_default()
                .push(loaded);
        }
    }
    for (country, group) in &national {
        if group.len() > 1 {
            for loaded in group {
                out.push(
                    Issue::new(
                        &loaded.record.id,
                        &loaded.path,
                        IssueType::DuplicateNationalRecord,
                        "properties.is_national",
                        format!("at most one national record per country ({country})"),
                    )
                    .with_value(country.clone()),
                );
            }
        }
    }

    out
}
