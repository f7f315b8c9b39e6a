//! Pay breakdown models.
//!
//! This module contains the [`PayBreakdown`] type and its segments, which
//! explain how the total for an interval was reached: every run of
//! consecutive minutes sharing the same classification becomes one
//! [`PaySegment`].

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Time-of-day and schedule category of a worked minute.
///
/// Holiday and Sunday status are carried separately on the segment because
/// they stack with any category.
///
/// # Example
///
/// ```
/// use work_tracker::models::PayCategory;
///
/// assert!(PayCategory::NightOvertime.is_overtime());
/// assert!(!PayCategory::NightScheduled.is_overtime());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayCategory {
    /// Inside a scheduled shift, outside the night window.
    Scheduled,
    /// Inside a scheduled shift and the night window.
    NightScheduled,
    /// Outside every shift, outside the night window.
    DayOvertime,
    /// Outside every shift, inside the night window.
    NightOvertime,
}

impl PayCategory {
    /// Builds the category from the two schedule/time-of-day flags.
    pub fn from_flags(in_shift: bool, is_night: bool) -> Self {
        match (in_shift, is_night) {
            (true, false) => PayCategory::Scheduled,
            (true, true) => PayCategory::NightScheduled,
            (false, false) => PayCategory::DayOvertime,
            (false, true) => PayCategory::NightOvertime,
        }
    }

    /// True for minutes outside every scheduled shift.
    pub fn is_overtime(self) -> bool {
        matches!(self, PayCategory::DayOvertime | PayCategory::NightOvertime)
    }

    /// True for minutes inside the night window.
    pub fn is_night(self) -> bool {
        matches!(self, PayCategory::NightScheduled | PayCategory::NightOvertime)
    }
}

/// A maximal run of identically classified minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaySegment {
    /// First minute of the run.
    pub start: NaiveDateTime,
    /// Exclusive end of the run.
    pub end: NaiveDateTime,
    /// Number of minutes in the run.
    pub minutes: i64,
    /// Schedule/time-of-day category.
    pub category: PayCategory,
    /// Minutes fall on a public holiday.
    pub is_holiday: bool,
    /// Minutes fall on a Sunday.
    pub is_sunday: bool,
    /// Combined multiplier applied to the base per-minute rate.
    pub multiplier: Decimal,
    /// Unrounded amount accrued over the run.
    pub amount: Decimal,
}

/// The result of a breakdown calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// Segments in chronological order.
    pub segments: Vec<PaySegment>,
    /// Minutes accrued.
    pub total_minutes: i64,
    /// Total pay, rounded to cents.
    pub total_pay: Decimal,
}

impl PayBreakdown {
    /// Minutes spent outside scheduled shifts.
    pub fn overtime_minutes(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| s.category.is_overtime())
            .map(|s| s.minutes)
            .sum()
    }

    /// Minutes inside the night window.
    pub fn night_minutes(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| s.category.is_night())
            .map(|s| s.minutes)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn segment(category: PayCategory, minutes: i64) -> PaySegment {
        let start = make_datetime("2024-03-04 09:00:00");
        PaySegment {
            start,
            end: start + chrono::Duration::minutes(minutes),
            minutes,
            category,
            is_holiday: false,
            is_sunday: false,
            multiplier: Decimal::ONE,
            amount: Decimal::ZERO,
        }
    }

    #[test]
    fn test_category_from_flags() {
        assert_eq!(PayCategory::from_flags(true, false), PayCategory::Scheduled);
        assert_eq!(PayCategory::from_flags(true, true), PayCategory::NightScheduled);
        assert_eq!(PayCategory::from_flags(false, false), PayCategory::DayOvertime);
        assert_eq!(PayCategory::from_flags(false, true), PayCategory::NightOvertime);
    }

    #[test]
    fn test_minute_totals_by_category() {
        let breakdown = PayBreakdown {
            segments: vec![
                segment(PayCategory::Scheduled, 30),
                segment(PayCategory::NightScheduled, 20),
                segment(PayCategory::NightOvertime, 10),
                segment(PayCategory::DayOvertime, 5),
            ],
            total_minutes: 65,
            total_pay: Decimal::ZERO,
        };

        assert_eq!(breakdown.overtime_minutes(), 15);
        assert_eq!(breakdown.night_minutes(), 30);
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&PayCategory::NightOvertime).unwrap();
        assert_eq!(json, "\"night_overtime\"");
    }
}
