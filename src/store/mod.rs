//! Store Module
//!
//! Concurrent key → entry storage with atomic insert-if-absent, counter
//! mutation and bulk expiry deletion.

mod entry;
mod memory;


use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use crate::error::Result;

// Re-export public types
pub use entry::Entry;
pub use memory::MemoryStore;

// == Store Contract ==
/// Linearizable operations over the short code table.
///
/// Every operation checks `cancel` once on entry and fails with
/// `ShortenerError::Canceled` without touching state if it is already
/// cancelled. Entries cross this boundary by value only.
#[async_trait]
pub trait Store: Send + Sync {
    /// Stores `entry` iff no entry with the same key exists, otherwise
    /// fails with `AlreadyExists`. Check and insert are one atomic step.
    async fn insert_if_absent(&self, cancel: &CancellationToken, entry: Entry) -> Result<()>;

    /// Returns a copy of the entry stored at `key`, or `NotFound`.
    async fn lookup(&self, cancel: &CancellationToken, key: &str) -> Result<Entry>;

    /// Adds one to `access_count` and sets `last_accessed_at = at`, or `NotFound`.
    async fn increment_access_counter(
        &self,
        cancel: &CancellationToken,
        key: &str,
        at: DateTime<Utc>,
    ) -> Result<()>;

    /// Removes every entry with `expires_at < threshold` and returns how many.
    async fn delete_expired_before(
        &self,
        cancel: &CancellationToken,
        threshold: DateTime<Utc>,
    ) -> Result<usize>;
}

/// Fails with `Canceled` if the token has already fired.
pub(crate) fn ensure_active(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        Err(crate::error::ShortenerError::Canceled)
    } else {
        Ok(())
    }
}
