// SPDX-License-Identifier: Apache-2.0

use datacat_model::CatalogRecord;
use datacat_refdata::{catalog_type_subdir, is_country_bucket};
use std::path::{Path, PathBuf};

pub const RECORD_EXT: &str = "yaml";
pub const SOFTWARE_DIR: &str = "software";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Tree {
    Entities,
    Scheduled,
}

impl Tree {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entities => "entities",
            Self::Scheduled => "scheduled",
        }
    }

    pub const BOTH: [Self; 2] = [Self::Entities, Self::Scheduled];
}

/// Deterministic on-disk path for a record:
/// `<root>/<tree>/<COUNTRY>/<kind>/<id>.yaml`. Unknown country buckets
/// collapse to `Unknown`.
#[must_use]
pub fn record_path(root: &Path, tree: Tree, record: &CatalogRecord) -> PathBuf {
    let bucket = record.country_bucket();
    let bucket = if is_country_bucket(&bucket) {
        bucket
    } else {
        "Unknown".to_string()
    };
    let kind = catalog_type_subdir(record.catalog_type);
    root.join(tree.as_str())
        .join(bucket)
        .join(kind)
        .join(format!("{}.{RECORD_EXT}", record.id))
}

#[must_use]
pub fn software_record_path(root: &Path, software_id: &str) -> PathBuf {
    root.join(SOFTWARE_DIR)
        .join(format!("{software_id}.{RECORD_EXT}"))
}
