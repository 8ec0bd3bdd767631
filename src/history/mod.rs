//! # History Cache
//!
//! Persisted, capacity-bounded record of past analyses, newest first.

pub mod cache;
pub mod entry;
pub mod storage;
pub mod store;

pub use cache::{HistoryCache, HISTORY_STORAGE_KEY};
pub use entry::{EntrySource, HistoryEntry, NewHistoryEntry};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{HistoryStore, DEFAULT_CAPACITY};
