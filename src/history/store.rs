//! Durable storage for the history ledger.
//!
//! The ledger lives under a single fixed key. [`JsonFileStore`] maps that key
//! to a JSON file in the user's data directory; [`MemoryStore`] keeps it in
//! process for tests and ephemeral sessions.

use super::HistoryEntry;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Key under which the ledger is stored.
pub const HISTORY_KEY: &str = "calc_history";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed history data: {0}")]
    Format(#[from] serde_json::Error),

    #[error("no data directory available")]
    NoDataDir,
}

/// Load and save the serialized ledger.
pub trait HistoryStore {
    /// Read the stored entries. A missing entry is `Ok` with an empty list.
    fn load(&self) -> Result<Vec<HistoryEntry>, StoreError>;

    /// Replace the stored entries.
    fn save(&self, entries: &[HistoryEntry]) -> Result<(), StoreError>;
}

/// File-backed store: one JSON array per key.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `dir`, writing `<dir>/calc_history.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", HISTORY_KEY)),
        }
    }

    /// Store in the platform data directory (`~/.local/share/zcalc` on Linux).
    pub fn default_location() -> Result<Self, StoreError> {
        let dir = dirs::data_dir().ok_or(StoreError::NoDataDir)?;
        Ok(Self::in_dir(dir.join("zcalc")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), StoreError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;

        let json = serde_json::to_vec(entries)?;

        // Write to a sibling temp file and rename over the target
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(&json).map_err(|e| self.io_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;
        Ok(())
    }
}

/// In-process store holding the serialized ledger text.
///
/// Keeps the JSON form rather than the entries so tests exercise the same
/// encoding as the file store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw text, which need not be valid JSON.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            data: Mutex::new(Some(raw.into())),
        }
    }

    /// The raw stored text, if anything was written.
    pub fn raw(&self) -> Option<String> {
        self.data.lock().ok().and_then(|data| data.clone())
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        match self.raw() {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), StoreError> {
        let json = serde_json::to_string(entries)?;
        if let Ok(mut data) = self.data.lock() {
            *data = Some(json);
        }
        Ok(())
    }
}

impl<S: HistoryStore + ?Sized> HistoryStore for &S {
    fn load(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        (**self).load()
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), StoreError> {
        (**self).save(entries)
    }
}
