// SPDX-License-Identifier: Apache-2.0

//! Trust scoring. The score is a pure function of the record plus an
//! injected set of re3data trust-seal holders; the component breakdown is
//! persisted alongside the total for audit.

use datacat_model::{
    ApiStatus, CatalogRecord, CatalogType, OwnerType, RecordStatus, RightsType, TrustBreakdown,
};
use std::collections::BTreeSet;

pub const RE3DATA_IDENTIFIER: &str = "re3data";

/// Evidence the scorer cannot derive from the record itself.
#[derive(Debug, Clone, Default)]
pub struct TrustContext {
    /// Repository ids known to hold a re3data trust seal.
    pub re3data_seals: BTreeSet<String>,
}

const fn owner_type_points(owner_type: OwnerType) -> i32 {
    match owner_type {
        OwnerType::Academy => 40,
        OwnerType::CentralGovernment => 35,
        OwnerType::RegionalGovernment | OwnerType::International => 30,
        OwnerType::LocalGovernment => 25,
        OwnerType::Ngo | OwnerType::CivilSociety => 15,
        OwnerType::Business => 10,
        OwnerType::Community => 5,
    }
}

const fn catalog_type_points(catalog_type: CatalogType) -> i32 {
    match catalog_type {
        CatalogType::ScientificDataRepository => 10,
        CatalogType::OpenDataPortal
        | CatalogType::Geoportal
        | CatalogType::IndicatorsCatalog
        | CatalogType::MicrodataCatalog => 5,
        CatalogType::MachineLearningCatalog
        | CatalogType::ApiCatalog
        | CatalogType::MetadataCatalog
        | CatalogType::Other => 0,
        CatalogType::DataMarketplace => -5,
        CatalogType::DataSearchEngine => -10,
    }
}

fn license_points(record: &CatalogRecord) -> i32 {
    let Some(rights) = &record.rights else {
        return -15;
    };
    let license_present = [&rights.license_id, &rights.license_name, &rights.license_url]
        .iter()
        .any(|f| f.as_deref().is_some_and(|v| !v.trim().is_empty()));
    if !license_present {
        return -15;
    }
    let mut points = 15;
    points += if rights.rights_type == RightsType::Unknown {
        -5
    } else {
        5
    };
    points
}

fn re3data_points(record: &CatalogRecord, context: &TrustContext) -> i32 {
    let identifier = record
        .identifiers
        .iter()
        .find(|i| i.id == RE3DATA_IDENTIFIER && i.is_complete());
    let Some(identifier) = identifier else {
        return 0;
    };
    let mut points = 10;
    let sealed = context.re3data_seals.contains(&record.id)
        || identifier
            .value
            .as_deref()
            .is_some_and(|v| context.re3data_seals.contains(v));
    if sealed {
        points += 10;
    }
    points
}

fn extras_points(record: &CatalogRecord) -> i32 {
    let mut points = 0;
    if record.api && record.api_status == ApiStatus::Active {
        points += 5;
    }
    match record.status {
        RecordStatus::Active => points += 5,
        RecordStatus::Inactive => points -= 5,
        RecordStatus::Scheduled | RecordStatus::Uncertain => {}
    }
    points
}

#[must_use]
pub fn trust_breakdown(record: &CatalogRecord, context: &TrustContext) -> TrustBreakdown {
    let owner_type = owner_type_points(record.owner.owner_type);
    let catalog_type = catalog_type_points(record.catalog_type);
    let license = license_points(record);
    let re3data = re3data_points(record, context);
    let extras = extras_points(record);
    let total = (owner_type + catalog_type + license + re3data + extras).clamp(0, 100);
    TrustBreakdown {
        owner_type,
        catalog_type,
        license,
        re3data,
        extras,
        total,
    }
}

/// Recompute and write back; returns whether the record changed.
pub fn apply_trust(record: &mut CatalogRecord, context: &TrustContext) -> bool {
    let breakdown = trust_breakdown(record, context);
    let changed = record.trust_score != Some(breakdown.total)
        || record.trust_breakdown.as_ref() != Some(&breakdown);
    record.trust_score = Some(breakdown.total);
    record.trust_breakdown = Some(breakdown);
    changed
}

#[cfg(test)]
mod tests {
    use super::{catalog_type_points, owner_type_points};
    use datacat_model::{CatalogType, OwnerType};

    #[test]
    fn owner_table_matches_policy() {
        assert_eq!(owner_type_points(OwnerType::Academy), 40);
        assert_eq!(owner_type_points(OwnerType::CentralGovernment), 35);
        assert_eq!(owner_type_points(OwnerType::Community), 5);
    }

    #[test]
    fn search_engines_lose_points() {
        assert_eq!(catalog_type_points(CatalogType::DataSearchEngine), -10);
        assert_eq!(catalog_type_points(CatalogType::ScientificDataRepository), 10);
    }
}
