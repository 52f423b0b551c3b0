// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod paths;
mod store;

pub const CRATE_NAME: &str = "datacat-store";

pub use paths::{record_path, software_record_path, Tree, RECORD_EXT, SOFTWARE_DIR};
pub use store::{LoadedRecord, RecordIter, RecordStore, StoreError, StoreErrorCode};
