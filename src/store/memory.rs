//! Memory Store Module
//!
//! In-process store: one HashMap behind a read/write lock.

use std::collections::hash_map::Entry as Slot;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, ShortenerError};
use crate::store::{ensure_active, Entry, Store};

// == Memory Store ==
/// Short code table guarded by a single `RwLock`.
///
/// `lookup` takes the shared side, every mutation the exclusive side.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Length ==
    /// Returns the number of physically present entries, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl Store for MemoryStore {
    // == Insert If Absent ==
    async fn insert_if_absent(&self, cancel: &CancellationToken, entry: Entry) -> Result<()> {
        ensure_active(cancel)?;

        let mut entries = self.entries.write().await;
        match entries.entry(entry.key.clone()) {
            Slot::Occupied(_) => Err(ShortenerError::AlreadyExists(entry.key)),
            Slot::Vacant(slot) => {
                slot.insert(entry);
                Ok(())
            }
        }
    }

    // == Lookup ==
    async fn lookup(&self, cancel: &CancellationToken, key: &str) -> Result<Entry> {
        ensure_active(cancel)?;

        let entries = self.entries.read().await;
        entries
            .get(key)
            .cloned()
            .ok_or_else(|| ShortenerError::NotFound(key.to_string()))
    }

    // == Increment Access Counter ==
    async fn increment_access_counter(
        &self,
        cancel: &CancellationToken,
        key: &str,
        at: DateTime<Utc>,
    ) -> Result<()> {
        ensure_active(cancel)?;

        let mut entries = self.entries.write().await;
        match entries.get_mut(key) {
            Some(entry) => {
                entry.record_access(at);
                Ok(())
            }
            None => Err(ShortenerError::NotFound(key.to_string())),
        }
    }

    // == Delete Expired Before ==
    async fn delete_expired_before(
        &self,
        cancel: &CancellationToken,
        threshold: DateTime<Utc>,
    ) -> Result<usize> {
        ensure_active(cancel)?;

        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at >= threshold);
        Ok(before - entries.len())
    }
}
