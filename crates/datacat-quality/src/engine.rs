// SPDX-License-Identifier: Apache-2.0

//! The enforcement loop: rules produce issues, fixers repair what they
//! can, and a second rule pass proves the corpus got strictly better.

use crate::fixers::{apply_fix, FixOutcome};
use crate::issue::{Issue, IssueType};
use crate::rules::{corpus_issues, record_issues};
use crate::trust::{apply_trust, TrustContext};
use datacat_core::{PipelineEvent, PipelineLog, PipelineStage};
use datacat_refdata::reference_context;
use datacat_store::{LoadedRecord, RecordStore, StoreError, StoreErrorCode, Tree};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct QualityOptions {
    /// Restrict to one rule; `None` runs them all.
    pub rule: Option<IssueType>,
    /// Report what would change without writing anything.
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum QualityError {
    Store(StoreError),
    /// A fixer left a record violating a structural invariant. This is a
    /// bug in the fixer, so the whole run aborts.
    InvariantBroken {
        record_id: String,
        violations: Vec<String>,
    },
    /// The pass after fixing did not shrink the issue list.
    FixerRegression {
        before: usize,
        after: usize,
    },
}

impl Display for QualityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::InvariantBroken {
                record_id,
                violations,
            } => write!(
                f,
                "fixer broke invariants on '{record_id}': {}",
                violations.join("; ")
            ),
            Self::FixerRegression { before, after } => write!(
                f,
                "fix pass did not converge: {before} issues before, {after} after"
            ),
        }
    }
}

impl std::error::Error for QualityError {}

impl From<StoreError> for QualityError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

/// Files that failed to load; reported but never fatal to the batch.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct QualityReport {
    pub issues: Vec<Issue>,
    pub skipped: Vec<SkippedFile>,
}

#[derive(Debug, Clone, Default)]
pub struct FixSummary {
    pub issues_before: usize,
    pub issues_after: usize,
    pub records_changed: usize,
    /// Issues no fixer could resolve.
    pub remaining: Vec<Issue>,
    pub skipped: Vec<SkippedFile>,
    pub events: Vec<PipelineEvent>,
}

fn load_corpus(store: &RecordStore) -> (Vec<LoadedRecord>, Vec<SkippedFile>) {
    let mut records = Vec::new();
    let mut skipped = Vec::new();
    for tree in Tree::BOTH {
        for item in store.iter(tree) {
            match item {
                Ok(loaded) => records.push(loaded),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable record");
                    skipped.push(SkippedFile {
                        path: PathBuf::from(err.message.split(':').next().unwrap_or_default()),
                        reason: err.to_string(),
                    });
                }
            }
        }
    }
    (records, skipped)
}

fn all_issues(records: &[LoadedRecord], rule: Option<IssueType>) -> Vec<Issue> {
    let mut issues = corpus_issues(records);
    for loaded in records {
        issues.extend(record_issues(&loaded.record, &loaded.path));
    }
    if let Some(rule) = rule {
        issues.retain(|i| i.issue_type == rule);
    }
    issues.sort_by(|a, b| {
        (&a.file_path, a.issue_type, &a.field).cmp(&(&b.file_path, b.issue_type, &b.field))
    });
    issues
}

/// Run every rule and report, mutating nothing.
pub fn report(store: &RecordStore, rule: Option<IssueType>) -> Result<QualityReport, QualityError> {
    let (records, skipped) = load_corpus(store);
    Ok(QualityReport {
        issues: all_issues(&records, rule),
        skipped,
    })
}

fn tree_of(path: &Path) -> Tree {
    let scheduled = path
        .components()
        .any(|c| c.as_os_str() == Tree::Scheduled.as_str());
    if scheduled {
        Tree::Scheduled
    } else {
        Tree::Entities
    }
}

/// Rules, then fixers, then re-validate. Aborts loudly when a fixer breaks
/// a structural invariant or when the second pass fails to shrink.
pub fn fix(store: &RecordStore, options: &QualityOptions) -> Result<FixSummary, QualityError> {
    let refs = reference_context();
    let mut log = PipelineLog::default();
    let (mut records, skipped) = load_corpus(store);
    let issues = all_issues(&records, options.rule);
    let issues_before = issues.len();
    log.emit_kv(
        PipelineStage::Validate,
        "quality.issues",
        "count",
        &issues_before.to_string(),
    );

    let mut records_changed = 0usize;
    let mut any_fixed = false;
    for loaded in &mut records {
        let record_issues: Vec<&Issue> = issues
            .iter()
            .filter(|i| i.file_path == loaded.path)
            .collect();
        if record_issues.is_empty() {
            continue;
        }
        let violations_before: Vec<String> = loaded
            .record
            .integrity_violations(&refs)
            .into_iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect();

        let mut changed = false;
        for issue in record_issues {
            if apply_fix(&mut loaded.record, issue, &loaded.path) == FixOutcome::Changed {
                changed = true;
            }
        }
        if !changed {
            continue;
        }
        any_fixed = true;

        let violations_after: Vec<String> = loaded
            .record
            .integrity_violations(&refs)
            .into_iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect();
        let introduced: Vec<String> = violations_after
            .iter()
            .filter(|v| !violations_before.contains(v))
            .cloned()
            .collect();
        if !introduced.is_empty() {
            return Err(QualityError::InvariantBroken {
                record_id: loaded.record.id.clone(),
                violations: introduced,
            });
        }

        records_changed += 1;
        log.emit_kv(
            PipelineStage::Repair,
            "quality.repaired",
            "id",
            &loaded.record.id,
        );
        if !options.dry_run {
            let tree = tree_of(&loaded.path);
            let new_path = store.save(tree, &loaded.record)?;
            if new_path != loaded.path {
                // Repairs that move a record (country inference) leave no
                // stale copy behind.
                std::fs::remove_file(&loaded.path).map_err(|e| {
                    StoreError::new(
                        StoreErrorCode::Io,
                        format!("{}: {e}", loaded.path.display()),
                    )
                })?;
            }
            loaded.path = new_path;
        }
    }

    let remaining = all_issues(&records, options.rule);
    let issues_after = remaining.len();
    if any_fixed && issues_after >= issues_before {
        return Err(QualityError::FixerRegression {
            before: issues_before,
            after: issues_after,
        });
    }
    tracing::info!(
        before = issues_before,
        after = issues_after,
        changed = records_changed,
        dry_run = options.dry_run,
        "fix pass complete"
    );

    log.emit_kv(
        PipelineStage::Finalize,
        "quality.converged",
        "remaining",
        &issues_after.to_string(),
    );
    Ok(FixSummary {
        issues_before,
        issues_after,
        records_changed,
        remaining,
        skipped,
        events: log.into_events(),
    })
}

/// Recompute trust scores across `entities/` and `scheduled/`.
pub fn rescore(
    store: &RecordStore,
    context: &TrustContext,
    dry_run: bool,
) -> Result<usize, QualityError> {
    let (mut records, _skipped) = load_corpus(store);
    let mut changed = 0usize;
    for loaded in &mut records {
        if apply_trust(&mut loaded.record, context) {
            changed += 1;
            if !dry_run {
                store.save(tree_of(&loaded.path), &loaded.record)?;
            }
        }
    }
    tracing::info!(records = records.len(), changed, dry_run, "trust rescore complete");
    Ok(changed)
}
