// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod record;
mod schema;
mod software;

pub const CRATE_NAME: &str = "datacat-model";

pub use record::{
    AccessMode, ApiStatus, CatalogRecord, CatalogType, ContentType, Country, Coverage, Endpoint,
    Identifier, Lang, Location, Macroregion, Owner, OwnerType, Properties, RecordStatus,
    ReferenceContext, Rights, RightsType, SoftwareRef, Topic, TopicType, TrustBreakdown,
    Violation, COVERAGE_LEVELS, TAG_MAX_LEN, TAG_MIN_LEN, UNKNOWN_COUNTRY,
};
pub use schema::{catalog_schema, software_schema, validate_value, FieldKind, FieldSpec, Schema};
pub use software::{MetadataSupport, SoftwareCategory, SoftwareRecord, SupportLevel};
