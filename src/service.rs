//! Shortener Service
//!
//! Allocates values to fresh short codes and resolves codes back to values.
//!
//! # Operations
//! - `allocate` - Generate a code and insert it, retrying on collision
//! - `resolve` - Return the live value and count the access in the background
//! - `stats` - Return a copy of the live entry

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::config::Config;
use crate::error::{Result, ShortenerError};
use crate::shortcode::{CodeGenerator, RandomCodeGenerator};
use crate::store::{Entry, Store};

/// Default number of allocation attempts
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default time-to-live for new entries
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

// == Shortener Service ==
/// Composes a store, a code generator and a clock.
///
/// All collaborators are injected so tests can substitute a fixed clock or a
/// deterministic generator.
pub struct ShortenerService {
    store: Arc<dyn Store>,
    generator: Arc<dyn CodeGenerator>,
    clock: Arc<dyn Clock>,
    default_ttl: Duration,
    max_attempts: u32,
    /// Governs fire-and-forget work spawned by `resolve`
    background: CancellationToken,
}

impl ShortenerService {
    // == Constructor ==
    /// Creates a service with the default TTL and attempt budget.
    pub fn new(
        store: Arc<dyn Store>,
        generator: Arc<dyn CodeGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            generator,
            clock,
            default_ttl: DEFAULT_TTL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            background: CancellationToken::new(),
        }
    }

    /// Creates a service with a random generator and limits taken from `config`.
    pub fn from_config(
        config: &Config,
        store: Arc<dyn Store>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let generator = RandomCodeGenerator::new(&config.code_alphabet, config.code_length)?;
        Ok(Self::new(store, Arc::new(generator), clock)
            .with_default_ttl(config.default_ttl())
            .with_max_attempts(config.max_attempts))
    }

    /// Sets the TTL used when a caller passes zero.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Sets the allocation attempt budget (at least one attempt is always made).
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Returns the store this service writes to.
    pub fn store(&self) -> Arc<dyn Store> {
        Arc::clone(&self.store)
    }

    /// Returns the clock this service reads.
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Stops pending background counter updates.
    pub fn shutdown(&self) {
        self.background.cancel();
    }

    // == Allocate ==
    /// Binds `value` to a newly generated, unique short code.
    ///
    /// A zero `ttl` means the default TTL; if that is zero too the call fails
    /// with `InvalidRequest`, since `expires_at` must lie after `created_at`.
    /// Collisions are retried with a new
    /// candidate up to `max_attempts` times; any other store error aborts.
    pub async fn allocate(
        &self,
        cancel: &CancellationToken,
        value: &str,
        ttl: Duration,
    ) -> Result<Entry> {
        let ttl = if ttl.is_zero() { self.default_ttl } else { ttl };
        if ttl.is_zero() {
            return Err(ShortenerError::InvalidRequest(
                "TTL must be greater than zero".to_string(),
            ));
        }
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|_| ShortenerError::InvalidRequest(format!("TTL {:?} is too large", ttl)))?;

        let now = self.clock.now();
        if now.checked_add_signed(ttl).is_none() {
            return Err(ShortenerError::InvalidRequest(
                "TTL overflows the calendar".to_string(),
            ));
        }

        for attempt in 1..=self.max_attempts {
            let entry = Entry::new(self.generator.generate(), value, now, ttl);

            match self.store.insert_if_absent(cancel, entry.clone()).await {
                Ok(()) => return Ok(entry),
                Err(ShortenerError::AlreadyExists(code)) => {
                    debug!(code = %code, attempt, "Short code collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            attempts = self.max_attempts,
            "Short code allocation exhausted its attempts"
        );
        Err(ShortenerError::RetriesExhausted {
            attempts: self.max_attempts,
        })
    }

    // == Resolve ==
    /// Returns the value stored at `key` if it is still live.
    ///
    /// The access counter is bumped by a spawned task; its failure is logged
    /// and never affects the returned value.
    pub async fn resolve(&self, cancel: &CancellationToken, key: &str) -> Result<String> {
        let accessed_at = self.clock.now();
        let entry = self.live_entry(cancel, key, accessed_at).await?;

        let store = Arc::clone(&self.store);
        let background = self.background.clone();
        let key = key.to_string();
        tokio::spawn(async move {
            if let Err(e) = store
                .increment_access_counter(&background, &key, accessed_at)
                .await
            {
                debug!(code = %key, error = %e, "Access counter update skipped");
            }
        });

        Ok(entry.value)
    }

    // == Stats ==
    /// Returns a copy of the live entry at `key`.
    pub async fn stats(&self, cancel: &CancellationToken, key: &str) -> Result<Entry> {
        self.live_entry(cancel, key, self.clock.now()).await
    }

    async fn live_entry(
        &self,
        cancel: &CancellationToken,
        key: &str,
        now: DateTime<Utc>,
    ) -> Result<Entry> {
        let entry = self.store.lookup(cancel, key).await?;
        if entry.is_expired(now) {
            return Err(ShortenerError::Expired(key.to_string()));
        }
        Ok(entry)
    }
}
