// SPDX-License-Identifier: Apache-2.0

//! Quality enforcement over the record corpus: a taxonomy of defect
//! rules, deterministic fixers, and derived trust scores.

#![forbid(unsafe_code)]

mod engine;
mod fixers;
mod issue;
mod rules;
mod trust;

pub const CRATE_NAME: &str = "datacat-quality";

pub use engine::{
    fix, report, rescore, FixSummary, QualityError, QualityOptions, QualityReport, SkippedFile,
};
pub use fixers::{apply_fix, FixOutcome};
pub use issue::{Issue, IssueType, Severity};
pub use rules::{corpus_issues, record_issues};
pub use trust::{apply_trust, trust_breakdown, TrustContext, RE3DATA_IDENTIFIER};
