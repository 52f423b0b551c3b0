// SPDX-License-Identifier: Apache-2.0

//! Compiles `entities/` into distributable artifacts. Every output is a
//! pure function of the loaded records, so reruns are byte-identical.

#![forbid(unsafe_code)]

use datacat_core::{stable_hash_hex, stable_json_bytes};
use datacat_model::CatalogRecord;
use datacat_store::{RecordStore, StoreError, Tree};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

pub const CRATE_NAME: &str = "datacat-compile";

pub const FULL_JSONL: &str = "full.jsonl";
pub const SOFTWARE_TSV: &str = "software.tsv";
pub const CATALOG_TYPES_TSV: &str = "catalog_types.tsv";
pub const MARKDOWN_DIR: &str = "markdown";

#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum CompileError {
    Store(StoreError),
    Io { path: PathBuf, message: String },
    Encode(String),
}

impl Display for CompileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Io { path, message } => write!(f, "{}: {message}", path.display()),
            Self::Encode(message) => write!(f, "encode: {message}"),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<StoreError> for CompileError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

#[derive(Debug, Clone)]
pub struct CompileReport {
    pub records: usize,
    /// SHA-256 over the bytes of `full.jsonl`.
    pub corpus_sha256: String,
    pub jsonl_path: PathBuf,
    pub markdown_pages: usize,
    /// Files that failed to load and were left out of the compilation.
    pub skipped: Vec<String>,
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), CompileError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CompileError::Io {
            path: parent.to_path_buf(),
            message: e.to_string(),
        })?;
    }
    fs::write(path, bytes).map_err(|e| CompileError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// One `(key, count, percent)` table, sorted by key, tab-separated.
fn stats_table(counts: &BTreeMap<String, usize>, total: usize) -> String {
    let mut out = String::from("key\tcount\tpercent\n");
    for (key, count) in counts {
        let percent = if total == 0 {
            0.0
        } else {
            *count as f64 * 100.0 / total as f64
        };
        let _ = writeln!(out, "{key}\t{count}\t{percent:.1}");
    }
    out
}

fn markdown_page(record: &CatalogRecord) -> String {
    let mut page = String::new();
    let _ = writeln!(page, "# {}", record.name);
    let _ = writeln!(page);
    let _ = writeln!(page, "- Link: <{}>", record.link);
    let _ = writeln!(page, "- Catalog type: {}", record.catalog_type);
    let _ = writeln!(page, "- Software: {}", record.software.name);
    if let Some(coverage) = record.coverage.first() {
        let _ = writeln!(page, "- Country: {}", coverage.location.country.name);
    }
    let _ = writeln!(page, "- Status: {}", record.status.as_str());
    if record.api {
        let _ = writeln!(page, "- API: yes ({} endpoints)", record.endpoints.len());
    } else {
        let _ = writeln!(page, "- API: no");
    }
    if let Some(score) = record.trust_score {
        let _ = writeln!(page, "- Trust score: {score}");
    }
    if let Some(description) = &record.description {
        let _ = writeln!(page);
        let _ = writeln!(page, "{description}");
    }
    page
}

fn page_key(record: &CatalogRecord) -> &str {
    record.uid.as_deref().unwrap_or(&record.id)
}

/// Compile `entities/` into `out_dir`. Records load in path order, so the
/// JSONL line order, the tables, and the hash are all reproducible.
pub fn compile(store: &RecordStore, out_dir: &Path) -> Result<CompileReport, CompileError> {
    let mut records: Vec<CatalogRecord> = Vec::new();
    let mut skipped = Vec::new();
    for item in store.iter(Tree::Entities) {
        match item {
            Ok(loaded) => records.push(loaded.record),
            Err(err) => {
                tracing::warn!(error = %err, "record left out of compilation");
                skipped.push(err.to_string());
            }
        }
    }

    let mut jsonl: Vec<u8> = Vec::new();
    for record in &records {
        let line = stable_json_bytes(record).map_err(|e| CompileError::Encode(e.to_string()))?;
        jsonl.extend_from_slice(&line);
        jsonl.push(b'\n');
    }
    let jsonl_path = out_dir.join(FULL_JSONL);
    write_file(&jsonl_path, &jsonl)?;
    let corpus_sha256 = stable_hash_hex(&jsonl);

    let total = records.len();
    let mut by_software: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_catalog_type: BTreeMap<String, usize> = BTreeMap::new();
    for record in &records {
        *by_software.entry(record.software.name.clone()).or_default() += 1;
        *by_catalog_type
            .entry(record.catalog_type.as_str().to_string())
            .or_default() += 1;
    }
    write_file(
        &out_dir.join(SOFTWARE_TSV),
        stats_table(&by_software, total).as_bytes(),
    )?;
    write_file(
        &out_dir.join(CATALOG_TYPES_TSV),
        stats_table(&by_catalog_type, total).as_bytes(),
    )?;

    let markdown_dir = out_dir.join(MARKDOWN_DIR);
    let mut markdown_pages = 0usize;
    for record in &records {
        let page_path = markdown_dir.join(format!("{}.md", page_key(record)));
        write_file(&page_path, markdown_page(record).as_bytes())?;
        markdown_pages += 1;
    }

    tracing::info!(
        records = total,
        pages = markdown_pages,
        sha256 = %corpus_sha256,
        "compilation complete"
    );
    Ok(CompileReport {
        records: total,
        corpus_sha256,
        jsonl_path,
        markdown_pages,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::stats_table;
    use std::collections::BTreeMap;

    #[test]
    fn stats_table_is_sorted_and_percented() {
        let counts = BTreeMap::from([("CKAN".to_string(), 3usize), ("ArcGIS Hub".to_string(), 1)]);
        let table = stats_table(&counts, 4);
        assert_eq!(
            table,
            "key\tcount\tpercent\nArcGIS Hub\t1\t25.0\nCKAN\t3\t75.0\n"
        );
    }

    #[test]
    fn empty_corpus_yields_header_only() {
        let table = stats_table(&BTreeMap::new(), 0);
        assert_eq!(table, "key\tcount\tpercent\n");
    }
}
