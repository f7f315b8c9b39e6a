//! Clock-in / clock-out state machine.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculation::{HolidaySource, ScheduleLookup, compute_pay};
use crate::config::RateConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::WorkSession;

/// Whether a session is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TrackerState {
    /// No open session.
    Idle,
    /// A session opened at `start` is running.
    Tracking {
        /// When the session was started.
        start: NaiveDateTime,
    },
}

/// Result of closing a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    /// The session lasted at least one whole minute and was priced.
    Recorded(WorkSession),
    /// The session lasted under a minute and was dropped.
    Discarded {
        /// When the dropped session started.
        start: NaiveDateTime,
        /// When it was stopped.
        end: NaiveDateTime,
    },
}

/// Tracks at most one open work session.
///
/// # Example
///
/// ```
/// use work_tracker::calculation::{HolidayList, ShiftSchedule};
/// use work_tracker::config::RateConfig;
/// use work_tracker::tracker::{StopOutcome, Tracker};
/// use chrono::{Duration, NaiveDateTime};
///
/// let start = NaiveDateTime::parse_from_str("2024-03-04 09:00", "%Y-%m-%d %H:%M").unwrap();
/// let mut tracker = Tracker::new();
/// tracker.start(start).unwrap();
///
/// let outcome = tracker
///     .stop(
///         start + Duration::minutes(3),
///         &RateConfig::default(),
///         &HolidayList::new(),
///         &ShiftSchedule::new(),
///     )
///     .unwrap();
/// match outcome {
///     StopOutcome::Recorded(session) => assert_eq!(session.total_minutes, 3),
///     StopOutcome::Discarded { .. } => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Tracker {
    state: TrackerState,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracker {
    /// Creates an idle tracker.
    pub fn new() -> Self {
        Self {
            state: TrackerState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// True while a session is open.
    pub fn is_tracking(&self) -> bool {
        matches!(self.state, TrackerState::Tracking { .. })
    }

    /// Opens a session at `now`.
    pub fn start(&mut self, now: NaiveDateTime) -> EngineResult<()> {
        if let TrackerState::Tracking { start } = self.state {
            return Err(EngineError::AlreadyTracking { since: start });
        }

        info!(start = %now, "Started tracking");
        self.state = TrackerState::Tracking { start: now };
        Ok(())
    }

    /// Closes the open session at `now` and prices it.
    ///
    /// Only whole elapsed minutes are paid: pay covers
    /// `[start, start + minutes)` while the session keeps `now` as its end
    /// time. Sessions shorter than a minute are discarded. The returned
    /// session has id 0 until it is recorded in a
    /// [`SessionLog`](super::SessionLog).
    pub fn stop<H, S>(
        &mut self,
        now: NaiveDateTime,
        config: &RateConfig,
        holidays: &H,
        schedule: &S,
    ) -> EngineResult<StopOutcome>
    where
        H: HolidaySource + ?Sized,
        S: ScheduleLookup + ?Sized,
    {
        let start = match self.state {
            TrackerState::Tracking { start } => start,
            TrackerState::Idle => return Err(EngineError::NotTracking),
        };
        self.state = TrackerState::Idle;

        let minutes = (now - start).num_minutes();
        if minutes < 1 {
            info!(%start, end = %now, "Discarded session shorter than one minute");
            return Ok(StopOutcome::Discarded { start, end: now });
        }

        let paid_until = start + Duration::minutes(minutes);
        let total_pay = compute_pay(start, paid_until, config, holidays, schedule);
        info!(%start, end = %now, minutes, %total_pay, "Stopped tracking");

        Ok(StopOutcome::Recorded(WorkSession {
            id: 0,
            start_time: start,
            end_time: now,
            total_minutes: minutes,
            total_pay,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{HolidayList, ShiftSchedule};
    use rust_decimal::Decimal;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn stop(tracker: &mut Tracker, now: NaiveDateTime) -> EngineResult<StopOutcome> {
        tracker.stop(now, &RateConfig::default(), &HolidayList::new(), &ShiftSchedule::new())
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let start = make_datetime("2024-03-04 09:00");
        let mut tracker = Tracker::new();
        tracker.start(start).unwrap();

        match tracker.start(start + Duration::minutes(5)) {
            Err(EngineError::AlreadyTracking { since }) => assert_eq!(since, start),
            other => panic!("Expected AlreadyTracking, got {:?}", other),
        }
        assert_eq!(tracker.state(), TrackerState::Tracking { start });
    }

    #[test]
    fn test_stop_while_idle_is_rejected() {
        let mut tracker = Tracker::new();
        assert!(matches!(
            stop(&mut tracker, make_datetime("2024-03-04 09:00")),
            Err(EngineError::NotTracking)
        ));
    }

    #[test]
    fn test_short_session_is_discarded() {
        let start = make_datetime("2024-03-04 09:00");
        let mut tracker = Tracker::new();
        tracker.start(start).unwrap();

        let outcome = stop(&mut tracker, start + Duration::seconds(59)).unwrap();
        assert!(matches!(outcome, StopOutcome::Discarded { .. }));
        assert!(!tracker.is_tracking());
    }

    #[test]
    fn test_partial_minute_is_not_paid() {
        let start = make_datetime("2024-03-04 09:00");
        let mut tracker = Tracker::new();
        tracker.start(start).unwrap();

        let end = start + Duration::seconds(3 * 60 + 45);
        let outcome = stop(&mut tracker, end).unwrap();
        let StopOutcome::Recorded(session) = outcome else {
            panic!("Expected a recorded session");
        };

        assert_eq!(session.total_minutes, 3);
        assert_eq!(session.end_time, end);
        // 3 * 0.13 * 1.25 = 0.4875
        assert_eq!(session.total_pay, Decimal::new(49, 2));
        assert_eq!(tracker.state(), TrackerState::Idle);
    }

    #[test]
    fn test_state_serializes_with_tag() {
        let json = serde_json::to_value(TrackerState::Idle).unwrap();
        assert_eq!(json["state"], "idle");

        let json = serde_json::to_value(TrackerState::Tracking {
            start: make_datetime("2024-03-04 09:00"),
        })
        .unwrap();
        assert_eq!(json["state"], "tracking");
        assert_eq!(json["start"], "2024-03-04T09:00:00");
    }
}
