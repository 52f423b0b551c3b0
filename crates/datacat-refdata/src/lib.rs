// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod catalogs;
mod countries;
mod domains;
mod probes;
mod software;

pub const CRATE_NAME: &str = "datacat-refdata";

pub use catalogs::{
    catalog_type_subdir, software_catalog_type, software_implies_map_layer, subdir_catalog_type,
};
pub use countries::{
    countries, country_langs, is_country_bucket, lang_name, macroregions, COUNTRY_BUCKETS,
};
pub use domains::{default_location, location_for_country, tld_country};
pub use probes::{probes_for, Probe, ProbeVerify};
pub use software::{software_name, software_names, software_registry};

use datacat_model::ReferenceContext;

/// The read-only context record invariants are checked against.
#[must_use]
pub fn reference_context() -> ReferenceContext<'static> {
    ReferenceContext {
        countries: countries(),
        macroregions: macroregions(),
        software_names: software_names(),
    }
}
