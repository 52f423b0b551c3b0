// SPDX-License-Identifier: Apache-2.0

//! Deterministic repairs. A fixer either rewrites the record in place or
//! refuses; it never leaves a record in a worse state than it found it.

use crate::issue::{Issue, IssueType};
use crate::rules::{is_placeholder_tag, is_short_code};
use datacat_core::registrable_origin;
use datacat_model::{
    ApiStatus, CatalogRecord, CatalogType, Country, OwnerType, Topic, TopicType, TAG_MAX_LEN,
    TAG_MIN_LEN,
};
use datacat_refdata::{countries, macroregions};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOutcome {
    Changed,
    NoChange,
}

/// Keyword hits in the description that seed tags and topics.
const DESCRIPTION_THEMES: &[(&str, &str, &str, &str)] = &[
    // (needle, tag, eudatatheme id, eudatatheme name)
    ("environment", "environment", "ENVI", "Environment"),
    ("health", "health", "HEAL", "Health"),
    ("education", "education", "EDUC", "Education, culture and sport"),
    ("transport", "transport", "TRAN", "Transport"),
    ("energy", "energy", "ENER", "Energy"),
    ("agricult", "agriculture", "AGRI", "Agriculture, fisheries, forestry and food"),
    ("statistic", "statistics", "ECON", "Economy and finance"),
    ("justice", "justice", "JUST", "Justice, legal system and public safety"),
];

/// Apply the fixer paired with `issue.issue_type`, if one exists.
pub fn apply_fix(record: &mut CatalogRecord, issue: &Issue, path: &Path) -> FixOutcome {
    match issue.issue_type {
        IssueType::ApiStatusMismatch => fix_api_status(record),
        IssueType::OwnerLocationHasMacroregion => fix_owner_macroregion(record),
        IssueType::DuplicateTags => fix_duplicate_tags(record),
        IssueType::TagHygiene => fix_tag_hygiene(record),
        IssueType::CountryNameMismatch => fix_country_names(record),
        IssueType::MissingMacroregion => fix_macroregions(record, path),
        IssueType::MissingOwnerLink | IssueType::InvalidOwnerUrl => fix_owner_link(record),
        IssueType::MissingTags => fix_missing_tags(record),
        IssueType::MissingTopics => fix_missing_topics(record),
        IssueType::SoftwareNameMismatch => fix_software_name(record),
        IssueType::IncompleteIdentifier => fix_identifiers(record),
        // Structural conflicts and unregistered software need an operator.
        IssueType::InconsistentLicense
        | IssueType::InvalidSoftwareId
        | IssueType::DuplicateRecordId
        | IssueType::DuplicateNationalRecord => FixOutcome::NoChange,
    }
}

fn fix_api_status(record: &mut CatalogRecord) -> FixOutcome {
    let has_endpoints = !record.endpoints.is_empty();
    let (api, api_status) = if has_endpoints {
        (true, ApiStatus::Active)
    } else {
        (false, ApiStatus::Uncertain)
    };
    if record.api == api && record.api_status == api_status {
        return FixOutcome::NoChange;
    }
    record.api = api;
    record.api_status = api_status;
    FixOutcome::Changed
}

fn fix_owner_macroregion(record: &mut CatalogRecord) -> FixOutcome {
    if record.owner.location.macroregion.take().is_some() {
        FixOutcome::Changed
    } else {
        FixOutcome::NoChange
    }
}

/// Case-insensitive dedupe; the first occurrence's spelling survives.
fn fix_duplicate_tags(record: &mut CatalogRecord) -> FixOutcome {
    let mut seen = std::collections::BTreeSet::new();
    let before = record.tags.len();
    record.tags.retain(|tag| seen.insert(tag.to_lowercase()));
    if record.tags.len() < before {
        FixOutcome::Changed
    } else {
        FixOutcome::NoChange
    }
}

fn fix_tag_hygiene(record: &mut CatalogRecord) -> FixOutcome {
    let before = record.tags.len();
    record.tags.retain(|tag| {
        let too_short = tag.len() < TAG_MIN_LEN && !is_short_code(tag);
        !(tag.trim().is_empty() || too_short || tag.len() > TAG_MAX_LEN || is_placeholder_tag(tag))
    });
    if record.tags.len() < before {
        FixOutcome::Changed
    } else {
        FixOutcome::NoChange
    }
}

fn fix_country_names(record: &mut CatalogRecord) -> FixOutcome {
    let mut changed = false;
    for coverage in &mut record.coverage {
        let country = &mut coverage.location.country;
        if let Some(expected) = countries().get(&country.id) {
            if &country.name != expected {
                country.name = expected.clone();
                changed = true;
            }
        }
    }
    let owner_country = &mut record.owner.location.country;
    if let Some(expected) = countries().get(&owner_country.id) {
        if &owner_country.name != expected {
            owner_country.name = expected.clone();
            changed = true;
        }
    }
    if changed {
        FixOutcome::Changed
    } else {
        FixOutcome::NoChange
    }
}

/// The country directory the file sits in, when it names a real country.
fn path_country(path: &Path) -> Option<String> {
    path.components()
        .filter_map(|c| c.as_os_str().to_str())
        .find(|segment| countries().contains_key(*segment))
        .map(str::to_string)
}

fn fix_macroregions(record: &mut CatalogRecord, path: &Path) -> FixOutcome {
    let mut changed = false;
    let inferred = path_country(path);
    for coverage in &mut record.coverage {
        let location = &mut coverage.location;
        if !countries().contains_key(&location.country.id) {
            // A record filed under a country directory but claiming an
            // unknown country inherits the directory's country.
            if let Some(id) = &inferred {
                if let Some(name) = countries().get(id) {
                    location.country = Country::new(id.clone(), name.clone());
                    changed = true;
                }
            }
        }
        if let Some(expected) = macroregions().get(&location.country.id) {
            if location.macroregion.as_ref() != Some(expected) {
                location.macroregion = Some(expected.clone());
                changed = true;
            }
        }
    }
    if changed {
        FixOutcome::Changed
    } else {
        FixOutcome::NoChange
    }
}

fn fix_owner_link(record: &mut CatalogRecord) -> FixOutcome {
    let Some(inferred) = registrable_origin(&record.link) else {
        return FixOutcome::NoChange;
    };
    if record.owner.link.as_deref() == Some(inferred.as_str()) {
        return FixOutcome::NoChange;
    }
    record.owner.link = Some(inferred);
    FixOutcome::Changed
}

fn fix_missing_tags(record: &mut CatalogRecord) -> FixOutcome {
    if !record.tags.is_empty() {
        return FixOutcome::NoChange;
    }
    let mut tags: Vec<String> = Vec::new();
    let mut push = |tag: &str| {
        let tag = tag.trim();
        if tag.len() >= TAG_MIN_LEN
            && tag.len() <= TAG_MAX_LEN
            && !is_placeholder_tag(tag)
            && !tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
        {
            tags.push(tag.to_string());
        }
    };

    push(match record.catalog_type {
        CatalogType::Geoportal => "geospatial",
        CatalogType::ScientificDataRepository => "research data",
        CatalogType::IndicatorsCatalog => "indicators",
        CatalogType::MicrodataCatalog => "microdata",
        CatalogType::MachineLearningCatalog => "machine learning",
        _ => "open data",
    });
    push(&record.software.name.to_lowercase());
    if matches!(
        record.owner.owner_type,
        OwnerType::CentralGovernment | OwnerType::RegionalGovernment | OwnerType::LocalGovernment
    ) {
        push("government");
    }
    if let Some(coverage) = record.coverage.first() {
        push(&coverage.location.country.name.to_lowercase());
    }
    if let Some(description) = &record.description {
        let folded = description.to_lowercase();
        for (needle, tag, _, _) in DESCRIPTION_THEMES {
            if folded.contains(needle) {
                push(tag);
            }
        }
    }

    if tags.is_empty() {
        return FixOutcome::NoChange;
    }
    record.tags = tags;
    FixOutcome::Changed
}

fn fix_missing_topics(record: &mut CatalogRecord) -> FixOutcome {
    if !record.topics.is_empty() {
        return FixOutcome::NoChange;
    }
    let mut topics: Vec<Topic> = Vec::new();
    let mut push = |id: &str, name: &str, topic_type: TopicType| {
        if !topics.iter().any(|t| t.id == id) {
            topics.push(Topic::new(id, name, topic_type));
        }
    };

    match record.catalog_type {
        CatalogType::Geoportal => {
            push("REGI", "Regions and cities", TopicType::Eudatatheme);
            push("boundaries", "Boundaries", TopicType::Iso19115);
        }
        CatalogType::ScientificDataRepository => {
            push("TECH", "Science and technology", TopicType::Eudatatheme);
        }
        CatalogType::IndicatorsCatalog | CatalogType::MicrodataCatalog => {
            push("ECON", "Economy and finance", TopicType::Eudatatheme);
        }
        _ => {
            push("GOVE", "Government and public sector", TopicType::Eudatatheme);
        }
    }
    if let Some(description) = &record.description {
        let folded = description.to_lowercase();
        for (needle, _, theme_id, theme_name) in DESCRIPTION_THEMES {
            if folded.contains(needle) {
                push(theme_id, theme_name, TopicType::Eudatatheme);
            }
        }
    }

    if topics.is_empty() {
        return FixOutcome::NoChange;
    }
    record.topics = topics;
    FixOutcome::Changed
}

fn fix_software_name(record: &mut CatalogRecord) -> FixOutcome {
    let Some(expected) = datacat_refdata::software_name(&record.software.id) else {
        return FixOutcome::NoChange;
    };
    if record.software.name == expected {
        return FixOutcome::NoChange;
    }
    record.software.name = expected.to_string();
    FixOutcome::Changed
}

fn fix_identifiers(record: &mut CatalogRecord) -> FixOutcome {
    let before = record.identifiers.len();
    record.identifiers.retain(datacat_model::Identifier::is_complete);
    if record.identifiers.len() < before {
        FixOutcome::Changed
    } else {
        FixOutcome::NoChange
    }
}
