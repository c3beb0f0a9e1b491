//! Time sources for task and notification timestamps.
//!
//! # Responsibility
//! - Decouple domain timestamps from the wall clock.
//! - Let tests and replays drive time deterministically.
//!
//! # Invariants
//! - Every clock is shareable across threads (`Send + Sync`).

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// Source of "now" for domain timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock.
///
/// Time only moves when `set` or `advance` is called, which keeps
/// timestamp assertions exact.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Jumps to an absolute instant. May move backwards.
    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.lock() = at;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
