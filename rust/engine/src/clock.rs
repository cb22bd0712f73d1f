use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

/// Wall-clock time source in unix seconds.
pub trait Clock: Send {
    fn now(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        u64::try_from(Utc::now().timestamp()).unwrap_or(0)
    }
}

/// Hand-driven clock. Clones share the same time, so a test can keep a handle
/// and advance the clock owned by a session.
///
/// ```
/// use showdown_engine::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new(100);
/// let handle = clock.clone();
/// handle.advance(5);
/// assert_eq!(clock.now(), 105);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start)),
        }
    }

    pub fn set(&self, t: u64) {
        self.now.store(t, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
