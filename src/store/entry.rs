//! Entry Module
//!
//! Defines a single short code record with its TTL window and access counters.

use chrono::{DateTime, Duration, Utc};

// == Entry ==
/// A short code bound to a value, valid on `[created_at, expires_at)`.
///
/// Stores hand out clones, never references into their map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The short code
    pub key: String,
    /// The stored value
    pub value: String,
    /// Creation instant
    pub created_at: DateTime<Utc>,
    /// First instant at which the entry is no longer valid
    pub expires_at: DateTime<Utc>,
    /// Number of successful resolutions
    pub access_count: u64,
    /// Instant of the most recent resolution, None = never accessed
    pub last_accessed_at: Option<DateTime<Utc>>,
}

impl Entry {
    // == Constructor ==
    /// Creates a fresh entry valid for `ttl` starting at `now`.
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            created_at: now,
            expires_at: now + ttl,
            access_count: 0,
            last_accessed_at: None,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: the entry is valid only while `now < expires_at`,
    /// so `now == expires_at` already counts as expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Records one access at `at`.
    pub(crate) fn record_access(&mut self, at: DateTime<Utc>) {
        self.access_count += 1;
        self.last_accessed_at = Some(at);
    }
}
