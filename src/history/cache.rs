//! # History Cache
//!
//! Bounded history of past analyses with write-through persistence.
//!
//! A cache starts empty and unhydrated. [`HistoryCache::hydrate`] replaces
//! the in-memory store with the durable snapshot; until then readers see
//! an empty history. Any mutation hydrates first so an early write never
//! clobbers the durable snapshot. [`HistoryCache::open`] collapses both
//! steps for callers that can load at startup.
//!
//! Storage failures are logged and never fatal: the cache carries on with
//! its in-memory state.

use chrono::Utc;
use uuid::Uuid;

use super::entry::{HistoryEntry, NewHistoryEntry};
use super::storage::KeyValueStorage;
use super::store::{HistoryStore, DEFAULT_CAPACITY};

/// Durable key holding the history snapshot
pub const HISTORY_STORAGE_KEY: &str = "mizan.analysis-history";

#[derive(Debug)]
pub struct HistoryCache<S: KeyValueStorage> {
    store: HistoryStore,
    storage: S,
    hydrated: bool,
}

impl<S: KeyValueStorage> HistoryCache<S> {
    /// Create an empty, unhydrated cache
    pub fn new(storage: S, capacity: usize) -> Self {
        Self {
            store: HistoryStore::new(capacity),
            storage,
            hydrated: false,
        }
    }

    /// Create a cache with the default capacity
    pub fn with_default_capacity(storage: S) -> Self {
        Self::new(storage, DEFAULT_CAPACITY)
    }

    /// Create a cache and hydrate it immediately
    pub fn open(storage: S, capacity: usize) -> Self {
        let mut cache = Self::new(storage, capacity);
        cache.hydrate();
        cache
    }

    /// Load the durable snapshot into memory.
    ///
    /// Corrupt snapshots are logged and leave the history empty. A failed
    /// read leaves the cache unhydrated so the next mutation retries, and
    /// nothing is written back until a read succeeds. Entries added while
    /// unhydrated are kept in front of the durable ones. Calling this
    /// after a successful load is a no-op.
    pub fn hydrate(&mut self) {
        if self.hydrated {
            return;
        }

        let raw = match self.storage.read(HISTORY_STORAGE_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to read history snapshot: {e:#}");
                return;
            }
        };
        self.hydrated = true;

        let durable = match raw {
            Some(raw) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("Ignoring corrupt history snapshot: {e}");
                    return;
                }
            },
            None => {
                tracing::debug!("No stored history under {HISTORY_STORAGE_KEY}");
                Vec::new()
            }
        };

        let pending = self.store.entries().to_vec();
        let mut store = HistoryStore::from_entries(durable, self.store.capacity());
        for entry in pending.iter().rev() {
            if store.get(&entry.id).is_none() {
                store.push_front(entry.clone());
            }
        }
        self.store = store;
        tracing::info!("Hydrated {} history entries", self.store.len());

        if !pending.is_empty() {
            self.persist();
        }
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Entries, newest first. Empty until hydrated.
    pub fn entries(&self) -> &[HistoryEntry] {
        self.store.entries()
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.store.get(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Record an analysis as the newest entry, evicting the oldest beyond
    /// capacity
    pub fn add_entry(&mut self, partial: NewHistoryEntry) -> HistoryEntry {
        self.hydrate();

        let entry = partial.into_entry(Uuid::new_v4().to_string(), Utc::now().timestamp_millis());
        self.store.push_front(entry.clone());
        tracing::debug!("Added history entry {}", entry.id);

        self.persist();
        entry
    }

    /// Remove one entry; unknown ids are a no-op
    pub fn remove_entry(&mut self, id: &str) {
        self.hydrate();

        if self.store.remove(id).is_some() {
            tracing::debug!("Removed history entry {id}");
        } else {
            tracing::debug!("No history entry {id} to remove");
        }
        self.persist();
    }

    pub fn clear_history(&mut self) {
        self.hydrate();

        self.store.clear();
        tracing::debug!("Cleared history");
        self.persist();
    }

    fn persist(&self) {
        if !self.hydrated {
            tracing::warn!("History not loaded from storage; keeping changes in memory only");
            return;
        }

        let snapshot = match serde_json::to_string(self.store.entries()) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("Failed to serialize history: {e}");
                return;
            }
        };

        if let Err(e) = self.storage.write(HISTORY_STORAGE_KEY, &snapshot) {
            tracing::warn!("Failed to persist history: {e:#}");
        }
    }
}
