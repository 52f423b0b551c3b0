// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod detector;
mod jsonld;
mod transport;

pub const CRATE_NAME: &str = "datacat-detect";

pub use detector::{
    detect_endpoints, merge_endpoints, DetectOutcome, SCHEMAORG_ENDPOINT_TYPE,
    SITEMAP_ENDPOINT_TYPE,
};
pub use jsonld::{html_has_data_catalog, sitemap_from_robots};
pub use transport::{
    HttpTransport, ProbeError, ProbeResponse, ProbeTransport, StubTransport, TransportConfig,
};
