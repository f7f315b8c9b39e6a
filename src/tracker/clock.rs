//! Wall-clock sources for the tracker.

use chrono::{NaiveDateTime, Utc};
use chrono_tz::Europe::Rome;
use std::sync::Mutex;

/// Supplies the current local date-time.
pub trait Clock: Send + Sync {
    /// Current local date-time, without an offset.
    fn now_local_naive(&self) -> NaiveDateTime;
}

/// Local time in Italy (`Europe/Rome`), following daylight saving changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RomeClock;

impl Clock for RomeClock {
    fn now_local_naive(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&Rome).naive_local()
    }
}

/// A clock that returns a settable instant.
///
/// # Example
///
/// ```
/// use work_tracker::tracker::{Clock, FixedClock};
/// use chrono::{Duration, NaiveDateTime};
///
/// let start = NaiveDateTime::parse_from_str("2024-03-04 09:00", "%Y-%m-%d %H:%M").unwrap();
/// let clock = FixedClock::new(start);
/// clock.advance(Duration::minutes(90));
/// assert_eq!(clock.now_local_naive(), start + Duration::minutes(90));
/// ```
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    /// Creates a clock stopped at `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: NaiveDateTime) {
        *self.lock() = now;
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.lock();
        *now += by;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NaiveDateTime> {
        // A poisoned guard still holds a valid instant.
        self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for FixedClock {
    fn now_local_naive(&self) -> NaiveDateTime {
        *self.lock()
    }
}
