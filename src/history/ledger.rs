//! Bounded, newest-first list of completed calculations.

use super::{HistoryEntry, HistoryStore};

/// Maximum number of entries kept.
pub const MAX_ENTRIES: usize = 50;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryLedger {
    entries: Vec<HistoryEntry>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the ledger from `store`.
    ///
    /// Missing or unreadable data yields an empty ledger; the failure is only
    /// logged. Oversized stored lists are cut back to [`MAX_ENTRIES`].
    pub fn load(store: &impl HistoryStore) -> Self {
        match store.load() {
            Ok(mut entries) => {
                entries.truncate(MAX_ENTRIES);
                tracing::debug!(count = entries.len(), "Loaded calculation history");
                Self { entries }
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable calculation history: {}", e);
                Self::new()
            }
        }
    }

    /// Write the full ledger to `store`.
    ///
    /// Failures are logged and otherwise ignored; the in-memory ledger stays
    /// authoritative for the rest of the session.
    pub fn persist(&self, store: &impl HistoryStore) {
        if let Err(e) = store.save(&self.entries) {
            tracing::warn!("Failed to persist calculation history: {}", e);
        }
    }

    /// Add `entry` as the newest item, evicting the oldest beyond the cap.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_ENTRIES);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }
}
