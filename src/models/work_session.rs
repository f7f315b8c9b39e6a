//! Finalized work session model.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A closed clock-in/clock-out session.
///
/// Open sessions never appear here: they live in
/// [`TrackerState::Tracking`](crate::tracker::TrackerState::Tracking) until
/// stopped, and are discarded when shorter than one minute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSession {
    /// Identifier assigned by the session log (0 until recorded).
    pub id: u64,
    /// When tracking started.
    pub start_time: NaiveDateTime,
    /// When tracking stopped.
    pub end_time: NaiveDateTime,
    /// Whole elapsed minutes.
    pub total_minutes: i64,
    /// Pay earned, rounded to cents.
    pub total_pay: Decimal,
}

impl WorkSession {
    /// Duration formatted as `"Xh Ym"`.
    ///
    /// # Example
    ///
    /// ```
    /// use work_tracker::models::WorkSession;
    /// use chrono::NaiveDateTime;
    /// use rust_decimal::Decimal;
    ///
    /// let start = NaiveDateTime::parse_from_str("2024-03-04 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// let session = WorkSession {
    ///     id: 1,
    ///     start_time: start,
    ///     end_time: start + chrono::Duration::minutes(125),
    ///     total_minutes: 125,
    ///     total_pay: Decimal::new(1625, 2),
    /// };
    /// assert_eq!(session.duration_label(), "2h 5m");
    /// ```
    pub fn duration_label(&self) -> String {
        format_minutes(self.total_minutes)
    }
}

/// Formats a minute count as `"Xh Ym"`.
pub fn format_minutes(minutes: i64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}
