//! TTL Eviction Task
//!
//! Background task that removes entries once they outlive the configured TTL.
//!
//! The task polls the oldest entry's write time and sleeps for a fraction
//! (`1 / ttl_delim`) of the time left until that entry expires. Each wake-up
//! lands geometrically closer to the real expiry instant, so an expired entry
//! is removed shortly after it goes stale without polling on a fixed tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, trace};

use crate::error::{KvError, Result};
use crate::storage::KvStore;

/// Divisor used unless [`EvictionScheduler::with_ttl_delim`] overrides it.
pub const DEFAULT_TTL_DELIM: u32 = 2;

/// Sleep used when the TTL or divisor cannot drive the adaptive interval.
pub const FALLBACK_SLEEP: Duration = Duration::from_secs(1);

/// Shortest sleep before an entry that has not yet expired.
///
/// Keeps the clock moving between wake-ups as the remaining time approaches
/// zero.
pub const MIN_SLEEP: Duration = Duration::from_millis(1);

// == Eviction Scheduler ==
/// Removes the least recently written entry once it is older than `ttl`.
#[derive(Debug)]
pub struct EvictionScheduler {
    store: Arc<KvStore>,
    ttl: Duration,
    ttl_delim: u32,
}

impl EvictionScheduler {
    // == Constructor ==
    /// Creates a scheduler for `store` evicting entries older than `ttl`.
    ///
    /// Fails with [`KvError::Configuration`] if `ttl` is zero.
    pub fn new(store: Arc<KvStore>, ttl: Duration) -> Result<Self> {
        if ttl.is_zero() {
            return Err(KvError::Configuration(
                "eviction ttl must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            store,
            ttl,
            ttl_delim: DEFAULT_TTL_DELIM,
        })
    }

    /// Sets how many times the scheduler wakes before the oldest entry expires.
    pub fn with_ttl_delim(mut self, ttl_delim: u32) -> Self {
        self.ttl_delim = ttl_delim;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn ttl_delim(&self) -> u32 {
        self.ttl_delim
    }

    // == Run ==
    /// Runs the eviction loop forever.
    ///
    /// A storage failure means the engine's state can no longer be trusted;
    /// the task logs it and panics rather than keep evicting from it.
    pub async fn run(self) {
        info!(
            ttl_secs = self.ttl.as_secs_f64(),
            ttl_delim = self.ttl_delim,
            "Starting TTL eviction task"
        );

        loop {
            if let Err(err) = self.tick().await {
                error!(error = %err, "TTL eviction task stopping on storage failure");
                panic!("TTL eviction task cannot continue: {err}");
            }
        }
    }

    /// One iteration: sleep until the next check is due, then try to evict the
    /// front entry. Returns whether an entry was evicted.
    pub async fn tick(&self) -> Result<bool> {
        let oldest = self.store.oldest_element_time()?;
        let period = sleep_period(oldest, Instant::now(), self.ttl, self.ttl_delim);
        trace!(sleep_ms = period.as_millis() as u64, "TTL eviction sleeping");

        tokio::time::sleep(period).await;

        // Nothing can be older than a cutoff before the clock's origin.
        let Some(cutoff) = Instant::now().checked_sub(self.ttl) else {
            return Ok(false);
        };

        let evicted = self.store.delete_front_if_older(cutoff)?;
        if evicted {
            let remaining = self.store.len()?;
            debug!(remaining, "TTL eviction removed expired entry");
        }
        Ok(evicted)
    }
}

// == Sleep Period ==
/// Computes how long the scheduler may sleep before its next check.
///
/// - `ttl` is zero or `ttl_delim < 2`: [`FALLBACK_SLEEP`]
/// - storage is empty: `ttl / ttl_delim`
/// - oldest entry already expired: zero
/// - otherwise: `(oldest + ttl - now) / ttl_delim`, at least [`MIN_SLEEP`]
pub fn sleep_period(
    oldest: Option<Instant>,
    now: Instant,
    ttl: Duration,
    ttl_delim: u32,
) -> Duration {
    if ttl.is_zero() || ttl_delim < 2 {
        return FALLBACK_SLEEP;
    }

    let Some(oldest) = oldest else {
        return ttl / ttl_delim;
    };
    let Some(expiry) = oldest.checked_add(ttl) else {
        return ttl / ttl_delim;
    };

    if expiry < now {
        return Duration::ZERO;
    }

    (expiry.saturating_duration_since(now) / ttl_delim).max(MIN_SLEEP)
}

/// Spawns the scheduler on the tokio runtime.
///
/// The returned handle never completes on its own; abort it on shutdown.
pub fn spawn_eviction_task(scheduler: EvictionScheduler) -> JoinHandle<()> {
    tokio::spawn(scheduler.run())
}
