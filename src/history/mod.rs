//! Calculation history.
//!
//! A bounded ledger of completed calculations, newest first, persisted as a
//! JSON array under a fixed key.

mod entry;
mod ledger;
mod store;

pub use entry::HistoryEntry;
pub use ledger::{HistoryLedger, MAX_ENTRIES};
pub use store::{HISTORY_KEY, HistoryStore, JsonFileStore, MemoryStore, StoreError};
