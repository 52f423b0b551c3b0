// SPDX-License-Identifier: Apache-2.0

use crate::paths::{record_path, Tree, RECORD_EXT};
use datacat_core::normalize_url;
use datacat_model::CatalogRecord;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorCode {
    NotFound,
    CorruptYaml,
    Io,
    DuplicateId,
    Internal,
}

impl StoreErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::CorruptYaml => "corrupt_yaml",
            Self::Io => "io_error",
            Self::DuplicateId => "duplicate_id",
            Self::Internal => "internal_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    fn io(path: &Path, err: &std::io::Error) -> Self {
        Self::new(StoreErrorCode::Io, format!("{}: {err}", path.display()))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug, Clone)]
pub struct LoadedRecord {
    pub path: PathBuf,
    pub record: CatalogRecord,
}

/// Filesystem-backed record collection rooted at a working tree that holds
/// `entities/` and `scheduled/`.
#[derive(Debug, Clone)]
pub struct RecordStore {
    root: PathBuf,
}

impl RecordStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn load(&self, path: &Path) -> Result<CatalogRecord, StoreError> {
        let raw = fs::read_to_string(path).map_err(|e| StoreError::io(path, &e))?;
        serde_yaml::from_str(&raw).map_err(|e| {
            StoreError::new(
                StoreErrorCode::CorruptYaml,
                format!("{}: {e}", path.display()),
            )
        })
    }

    /// Load without decoding into the typed model; used by the schema
    /// validator so defective documents still get field-level reports.
    pub fn load_raw(&self, path: &Path) -> Result<Value, StoreError> {
        let raw = fs::read_to_string(path).map_err(|e| StoreError::io(path, &e))?;
        let yaml: serde_yaml::Value = serde_yaml::from_str(&raw).map_err(|e| {
            StoreError::new(
                StoreErrorCode::CorruptYaml,
                format!("{}: {e}", path.display()),
            )
        })?;
        serde_json::to_value(yaml).map_err(|e| {
            StoreError::new(
                StoreErrorCode::CorruptYaml,
                format!("{}: non-JSON-mappable YAML: {e}", path.display()),
            )
        })
    }

    /// Write a record to its deterministic path, creating directories as
    /// needed. Key order follows the struct definition; unicode is kept
    /// verbatim.
    pub fn save(&self, tree: Tree, record: &CatalogRecord) -> Result<PathBuf, StoreError> {
        let path = record_path(&self.root, tree, record);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, &e))?;
        }
        let body = serde_yaml::to_string(record).map_err(|e| {
            StoreError::new(StoreErrorCode::Internal, format!("yaml encode: {e}"))
        })?;
        fs::write(&path, body).map_err(|e| StoreError::io(&path, &e))?;
        tracing::debug!(path = %path.display(), id = %record.id, "record saved");
        Ok(path)
    }

    /// Lazy walk over all records in a tree, sorted by path. Corrupt files
    /// surface as `Err` items; callers decide whether to stop or skip.
    pub fn iter(&self, tree: Tree) -> RecordIter {
        RecordIter::new(self.clone(), self.root.join(tree.as_str()))
    }

    pub fn record_files(&self, tree: Tree) -> Result<Vec<PathBuf>, StoreError> {
        let tree_root = self.root.join(tree.as_str());
        let mut out = Vec::new();
        if !tree_root.exists() {
            return Ok(out);
        }
        collect_record_files(&tree_root, &mut out)?;
        out.sort();
        Ok(out)
    }

    /// Find a record whose canonical link or id matches the given URL, in
    /// either tree. Entities win over scheduled.
    pub fn find_by_url(&self, url: &str) -> Result<Option<LoadedRecord>, StoreError> {
        let wanted = normalize_url(url);
        let wanted_id = datacat_core::id_from_url(url);
        for tree in Tree::BOTH {
            for item in self.iter(tree) {
                let loaded = item?;
                if normalize_url(&loaded.record.link) == wanted || loaded.record.id == wanted_id {
                    return Ok(Some(loaded));
                }
            }
        }
        Ok(None)
    }

    /// Ids present in both `entities/` and `scheduled/`. Overlap is legal
    /// only transiently during promotion, so callers surface it.
    pub fn cross_tree_duplicates(&self) -> Result<Vec<String>, StoreError> {
        let mut seen: BTreeMap<Tree, BTreeSet<String>> = BTreeMap::new();
        for tree in Tree::BOTH {
            let mut ids = BTreeSet::new();
            for path in self.record_files(tree)? {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.insert(stem.to_string());
                }
            }
            seen.insert(tree, ids);
        }
        let entities = seen.get(&Tree::Entities).cloned().unwrap_or_default();
        let scheduled = seen.get(&Tree::Scheduled).cloned().unwrap_or_default();
        Ok(entities.intersection(&scheduled).cloned().collect())
    }
}

fn collect_record_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), StoreError> {
    let entries = fs::read_dir(dir).map_err(|e| StoreError::io(dir, &e))?;
    for entry in entries {
        let entry = entry.map_err(|e| StoreError::io(dir, &e))?;
        let path = entry.path();
        if path.is_dir() {
            collect_record_files(&path, out)?;
        } else if path.extension().and_then(|e| e.to_str()) == Some(RECORD_EXT) {
            out.push(path);
        }
    }
    Ok(())
}

/// Iterator over a tree's records in path order.
pub struct RecordIter {
    store: RecordStore,
    files: std::vec::IntoIter<PathBuf>,
    failed: Option<StoreError>,
}

impl RecordIter {
    fn new(store: RecordStore, tree_root: PathBuf) -> Self {
        let mut files = Vec::new();
        let mut failed = None;
        if tree_root.exists() {
            if let Err(e) = collect_record_files(&tree_root, &mut files) {
                failed = Some(e);
            }
        }
        files.sort();
        Self {
            store,
            files: files.into_iter(),
            failed,
        }
    }
}

impl Iterator for RecordIter {
    type Item = Result<LoadedRecord, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.failed.take() {
            return Some(Err(err));
        }
        let path = self.files.next()?;
        match self.store.load(&path) {
            Ok(record) => Some(Ok(LoadedRecord { path, record })),
            Err(e) => Some(Err(e)),
        }
    }
}

impl Tree {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Entities => Self::Scheduled,
            Self::Scheduled => Self::Entities,
        }
    }
}

impl PartialOrd for Tree {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tree {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}
