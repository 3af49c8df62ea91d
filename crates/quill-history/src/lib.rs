//! Local history of generated content.
//!
//! [`HistoryStore`] keeps generation records in a single JSON file,
//! newest first, capped at [`MAX_ENTRIES`]. A missing file means an empty
//! history; an unreadable or corrupt file is treated as empty with a
//! warning rather than an error, so a damaged store never blocks new
//! work.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of records kept in the store.
pub const MAX_ENTRIES: usize = 50;

/// History error.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// I/O error reading or writing the store file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One generation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Record id (UUID v4).
    pub id: String,
    /// Topic the content was generated for.
    pub topic: String,
    /// Tone label used for the request.
    pub tone: String,
    /// Keyword list, as entered.
    pub keywords: String,
    /// Requested length in words.
    pub content_length: u32,
    /// Generated markdown.
    pub content: String,
    /// Creation time, unix milliseconds.
    pub created_at: u64,
}

impl HistoryEntry {
    /// Create a record with a fresh id and the current timestamp.
    #[must_use]
    pub fn new(
        topic: impl Into<String>,
        tone: impl Into<String>,
        keywords: impl Into<String>,
        content_length: u32,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            topic: topic.into(),
            tone: tone.into(),
            keywords: keywords.into(),
            content_length,
            content: content.into(),
            created_at: unix_millis(),
        }
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

/// JSON-file store of generation records.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Create a store backed by the given file path. The file is created
    /// lazily on the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all records, newest first.
    ///
    /// A missing file yields an empty list. A corrupt file is logged and
    /// also yields an empty list; the next write replaces it.
    #[must_use]
    pub fn load(&self) -> Vec<HistoryEntry> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("discarding corrupt history file {}: {e}", self.path.display());
                Vec::new()
            }
        }
    }

    /// Prepend a record, dropping the oldest entries beyond the cap.
    pub fn record(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut entries = self.load();
        entries.insert(0, entry);
        entries.truncate(MAX_ENTRIES);
        self.write(&entries)
    }

    /// Remove the record with the given id. Returns whether it existed.
    pub fn remove(&self, id: &str) -> Result<bool, HistoryError> {
        let mut entries = self.load();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.write(&entries)?;
        Ok(true)
    }

    /// Delete the whole store.
    pub fn clear(&self) -> Result<(), HistoryError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write all records as pretty-printed JSON to `target`.
    pub fn export_to(&self, target: &Path) -> Result<(), HistoryError> {
        let entries = self.load();
        fs::write(target, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }

    fn write(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(entries)?)?;
        Ok(())
    }
}
