//! Strictly increasing nonce generation

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch
fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Per-client nonce counter
///
/// Values are seeded from a millisecond clock. When two calls land in the
/// same tick, or the clock steps backwards, the previous value plus one is
/// used instead, so every value is strictly greater than the last one
/// handed out by this instance. Safe to share between threads.
#[derive(Debug)]
pub struct NonceSource {
    last: AtomicU64,
    clock: fn() -> u64,
}

impl NonceSource {
    /// Create a nonce source backed by the system clock
    pub fn new() -> Self {
        Self::with_clock(unix_millis)
    }

    /// Create a nonce source backed by a custom clock
    pub fn with_clock(clock: fn() -> u64) -> Self {
        Self {
            last: AtomicU64::new(0),
            clock,
        }
    }

    /// Next nonce value
    pub fn next(&self) -> u64 {
        let now = (self.clock)();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);

        now.max(previous.saturating_add(1))
    }

    /// Last value handed out, 0 if none yet
    pub fn last(&self) -> u64 {
        self.last.load(Ordering::SeqCst)
    }
}

impl Default for NonceSource {
    fn default() -> Self {
        Self::new()
    }
}
