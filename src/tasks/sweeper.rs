//! Expiration Sweeper Task
//!
//! Background task that periodically deletes entries whose TTL has passed.
//! Resolution already ignores expired entries, so a missed tick only delays
//! reclamation.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::error::Result;
use crate::store::Store;

/// Shortest accepted sweep interval; smaller values are raised to it
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Spawns the expiration sweeper on the current runtime.
///
/// The task stops once `cancel` fires; await the returned handle to wait
/// for it.
///
/// # Example
/// ```ignore
/// let shutdown = CancellationToken::new();
/// let handle = spawn_expiration_sweeper(store, clock, Duration::from_secs(3600), shutdown.clone());
/// // Later, during shutdown:
/// shutdown.cancel();
/// handle.await?;
/// ```
pub fn spawn_expiration_sweeper(
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        run_expiration_sweep(store, clock, interval, cancel).await;
    })
}

/// Sweeps every `interval` until `cancel` fires.
///
/// The first sweep happens one full interval after start. A failed tick is
/// logged and the loop carries on. Intervals below `MIN_SWEEP_INTERVAL`
/// (including zero) are raised to it.
pub async fn run_expiration_sweep(
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    interval: Duration,
    cancel: CancellationToken,
) {
    let interval = interval.max(MIN_SWEEP_INTERVAL);
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // First tick completes immediately
    ticker.tick().await;

    info!(interval_secs = interval.as_secs(), "Expiration sweeper started");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("Expiration sweeper shutting down");
                break;
            }
            _ = ticker.tick() => {
                if let Err(e) = sweep_once(store.as_ref(), clock.as_ref(), &cancel).await {
                    warn!(error = %e, "Expiration sweep failed");
                }
            }
        }
    }
}

/// Runs one sweep at the clock's current instant and returns the count removed.
pub async fn sweep_once(
    store: &dyn Store,
    clock: &dyn Clock,
    cancel: &CancellationToken,
) -> Result<usize> {
    let now = clock.now();
    let removed = store.delete_expired_before(cancel, now).await?;

    if removed > 0 {
        info!(removed, "Expiration sweep removed expired entries");
    } else {
        debug!("Expiration sweep found no expired entries");
    }

    Ok(removed)
}
