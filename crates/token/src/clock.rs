//! Clock seam for expiry computation.
//!
//! Expiry checks at second granularity are awkward to test against the real
//! clock, so the issuer and verifier read time through this trait.
//! Production code uses [`SystemClock`]; tests pin time with [`FixedClock`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current time in whole seconds since the Unix epoch
pub trait Clock: Send + Sync {
    /// Current time as epoch seconds
    fn now_epoch_secs(&self) -> u64;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_secs(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            // A clock before the epoch reads as second zero
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Deterministic clock for tests; shared handles observe `set`/`advance`
#[derive(Debug, Clone, Default)]
pub struct FixedClock {
    now: Arc<AtomicU64>,
}

impl FixedClock {
    /// Create a clock pinned at the given epoch second
    #[must_use]
    pub fn at(epoch_secs: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(epoch_secs)),
        }
    }

    /// Move the clock to an absolute instant
    pub fn set(&self, epoch_secs: u64) {
        self.now.store(epoch_secs, Ordering::SeqCst);
    }

    /// Advance the clock by the given number of seconds
    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_epoch_secs(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
