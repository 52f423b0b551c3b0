// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod canonical;
mod error;
mod events;
mod urls;

pub const CRATE_NAME: &str = "datacat-core";

pub use canonical::{stable_hash_hex, stable_json_bytes, stable_json_hash_hex};
pub use error::{CoreError, CoreErrorCode, ExitCode};
pub use events::{PipelineEvent, PipelineLog, PipelineStage};
pub use urls::{host_of, id_from_url, normalize_url, registrable_origin, tld_of};
