//! Wall-clock sources for the session log.

use chrono::{DateTime, Duration, FixedOffset, Local};
use parking_lot::Mutex;
use std::sync::Arc;

/// Local wall-clock time with its UTC offset.
pub type Timestamp = DateTime<FixedOffset>;

/// Source of the current wall-clock time.
///
/// Returns `None` when the time cannot be read; callers fall back instead of
/// failing.
pub trait Clock {
    fn now(&self) -> Option<Timestamp>;
}

/// Reads the host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Option<Timestamp> {
        Some(Local::now().fixed_offset())
    }
}

/// Manually driven clock for tests and simulated hosts.
///
/// Clones share the same underlying time, so a test can keep a handle and
/// advance the clock a `SessionLog` owns.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Arc<Mutex<Option<Timestamp>>>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: Arc::new(Mutex::new(Some(start))),
        }
    }

    /// A clock that never knows the time.
    pub fn unavailable() -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set(&self, at: Timestamp) {
        *self.current.lock() = Some(at);
    }

    pub fn advance_secs(&self, secs: i64) {
        let mut current = self.current.lock();
        if let Some(at) = current.as_mut() {
            *at += Duration::seconds(secs);
        }
    }

    pub fn make_unavailable(&self) {
        *self.current.lock() = None;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Option<Timestamp> {
        *self.current.lock()
    }
}
