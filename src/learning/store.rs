//! Pattern Store - durable JSON persistence for learned patterns
//!
//! The whole table is one JSON object keyed by pattern signature and is
//! rewritten on every save. Nothing here ever fails loudly: an unwritable
//! location degrades the store to a no-op, and a missing, unreadable or
//! malformed file loads as an empty table. A single record that does not fit
//! the schema makes the whole file malformed; nothing is repaired.
//!
//! Several processes pointing at the same file are not coordinated; the last
//! writer wins.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Flattened, serializable form of a learned pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRecord {
    pub constraint_signature: String,
    pub transformation_method: String,
    pub success_rate: f64,
    pub usage_count: u64,
    /// ISO-8601 timestamp
    pub created_at: String,
}

/// Signature -> record, in signature order
pub type PatternTable = BTreeMap<String, PatternRecord>;

/// Internal failures, all downgraded before leaving this module
#[derive(Debug, Error)]
enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed record {signature}: {reason}")]
    Malformed { signature: String, reason: String },

    #[error("Persistence unavailable")]
    Unavailable,
}

impl PatternRecord {
    /// Check the record against the file schema without altering it
    fn validate(&self, key: &str) -> Result<(), StoreError> {
        let malformed = |reason: String| StoreError::Malformed {
            signature: key.to_string(),
            reason,
        };

        if self.constraint_signature != key {
            return Err(malformed(format!(
                "constraint_signature '{}' does not match its key",
                self.constraint_signature
            )));
        }
        if !(0.0..=1.0).contains(&self.success_rate) {
            return Err(malformed(format!("success_rate {} outside [0, 1]", self.success_rate)));
        }
        if self.usage_count == 0 {
            return Err(malformed("usage_count must be at least 1".to_string()));
        }
        if self.transformation_method.chars().count() > crate::learning::METHOD_SUMMARY_LIMIT {
            return Err(malformed("transformation_method too long".to_string()));
        }
        if parse_timestamp(&self.created_at).is_none() {
            return Err(malformed(format!("unreadable created_at '{}'", self.created_at)));
        }
        Ok(())
    }
}

/// Accepts RFC 3339 and naive ISO-8601 timestamps (read as UTC)
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.and_utc())
}

/// JSON file backed pattern store
#[derive(Debug, Clone)]
pub struct PatternStore {
    /// `None` once the store has degraded to in-memory operation
    path: Option<PathBuf>,
}

impl PatternStore {
    /// Store at the default per-user location
    pub fn new() -> Self {
        match crate::config::default_pattern_path() {
            Ok(path) => Self::with_path(path),
            Err(e) => {
                warn!("No per-user config directory, pattern persistence disabled: {}", e);
                Self::in_memory()
            }
        }
    }

    /// Store at a caller-chosen file path.
    ///
    /// Creates the parent directory and checks it can be written; if either
    /// fails, or the path is a directory, the store degrades to in-memory
    /// operation.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match check_location(&path) {
            Ok(()) => {
                debug!("Pattern store at {}", path.display());
                Self { path: Some(path) }
            }
            Err(e) => {
                warn!(
                    "Pattern store location {} unusable, persistence disabled: {}",
                    path.display(),
                    e
                );
                Self::in_memory()
            }
        }
    }

    /// Store that never touches the filesystem
    pub fn in_memory() -> Self {
        Self { path: None }
    }

    /// Backing file, if persistence is available
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }

    /// Replace the persisted table. Returns false when nothing was written.
    pub fn save(&self, table: &PatternTable) -> bool {
        match self.try_save(table) {
            Ok(()) => true,
            Err(StoreError::Unavailable) => false,
            Err(e) => {
                warn!("Failed to save patterns: {}", e);
                false
            }
        }
    }

    /// Read the persisted table; missing or corrupt data loads as empty
    pub fn load(&self) -> PatternTable {
        match self.try_load() {
            Ok(table) => table,
            Err(StoreError::Unavailable) => PatternTable::new(),
            Err(e) => {
                warn!("Ignoring unreadable pattern file: {}", e);
                PatternTable::new()
            }
        }
    }

    /// Remove the persisted table if present
    pub fn clear(&self) -> bool {
        let Some(path) = &self.path else {
            return true;
        };

        match std::fs::remove_file(path) {
            Ok(()) => true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => {
                warn!("Failed to remove pattern file {}: {}", path.display(), e);
                false
            }
        }
    }

    fn try_save(&self, table: &PatternTable) -> Result<(), StoreError> {
        let path = self.path.as_ref().ok_or(StoreError::Unavailable)?;
        let dir = parent_dir(path);

        let json = serde_json::to_string_pretty(table)?;

        // write beside the target, then rename over it
        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        temp.write_all(json.as_bytes())?;
        temp.flush()?;
        temp.persist(path).map_err(|e| StoreError::Io(e.error))?;

        debug!("Saved {} patterns to {}", table.len(), path.display());
        Ok(())
    }

    fn try_load(&self) -> Result<PatternTable, StoreError> {
        let path = self.path.as_ref().ok_or(StoreError::Unavailable)?;
        if !path.exists() {
            return Ok(PatternTable::new());
        }

        let content = std::fs::read_to_string(path)?;
        let table: PatternTable = serde_json::from_str(&content)?;
        for (signature, record) in &table {
            record.validate(signature)?;
        }
        debug!("Loaded {} patterns from {}", table.len(), path.display());
        Ok(table)
    }
}

fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// The target must not be a directory and its parent must accept new files
fn check_location(path: &Path) -> Result<(), StoreError> {
    if path.is_dir() {
        return Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "path is a directory",
        )));
    }
    let dir = parent_dir(path);
    std::fs::create_dir_all(dir)?;
    // removed again on drop
    let scratch = tempfile::NamedTempFile::new_in(dir)?;
    drop(scratch);
    Ok(())
}

impl Default for PatternStore {
    fn default() -> Self {
        Self::new()
    }
}
