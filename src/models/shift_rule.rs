//! Shift rule model and related types.
//!
//! A [`ShiftRule`] is a recurring weekly work interval. Times have minute
//! resolution and are exchanged as `"HH:MM"` strings; a rule whose start is
//! after its end wraps past midnight.

use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{EngineError, EngineResult};

/// A recurring scheduled shift on one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRule {
    /// Identifier assigned by the schedule.
    pub id: u64,
    /// The weekday the rule starts on (serialized as 0..6, Monday = 0).
    #[serde(with = "weekday_index")]
    pub weekday: Weekday,
    /// Start time of day.
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    /// End time of day (exclusive).
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl ShiftRule {
    /// Returns true when the rule spans into the next calendar day.
    pub fn wraps_midnight(&self) -> bool {
        self.start > self.end
    }

    /// Checks whether a minute-truncated time of day falls inside the rule.
    ///
    /// Non-wrapping rules cover `[start, end)`. Wrapping rules cover
    /// `[start, 24:00)` and `[00:00, end)` of the same rule weekday.
    ///
    /// # Example
    ///
    /// ```
    /// use work_tracker::models::ShiftRule;
    /// use chrono::{NaiveTime, Weekday};
    ///
    /// let rule = ShiftRule {
    ///     id: 1,
    ///     weekday: Weekday::Mon,
    ///     start: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
    ///     end: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
    /// };
    /// assert!(rule.covers(NaiveTime::from_hms_opt(23, 30, 0).unwrap()));
    /// assert!(rule.covers(NaiveTime::from_hms_opt(5, 30, 0).unwrap()));
    /// assert!(!rule.covers(NaiveTime::from_hms_opt(6, 0, 0).unwrap()));
    /// ```
    pub fn covers(&self, time: NaiveTime) -> bool {
        let time = truncate_to_minute(time);
        if self.wraps_midnight() {
            time >= self.start || time < self.end
        } else {
            self.start <= time && time < self.end
        }
    }
}

impl fmt::Display for ShiftRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} - {}",
            weekday_name(self.weekday),
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// An unvalidated shift rule as it arrives from YAML or JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRuleDraft {
    /// Weekday index, Monday = 0.
    pub weekday: u8,
    /// Start as `"HH:MM"`.
    pub start: String,
    /// End as `"HH:MM"`.
    pub end: String,
}

impl ShiftRuleDraft {
    /// Validates the draft into its typed parts.
    pub fn parse(&self) -> EngineResult<(Weekday, NaiveTime, NaiveTime)> {
        let weekday = weekday_from_index(self.weekday).ok_or_else(|| {
            EngineError::InvalidShiftRule {
                message: format!("weekday must be between 0 and 6, got {}", self.weekday),
            }
        })?;
        Ok((weekday, parse_hhmm(&self.start)?, parse_hhmm(&self.end)?))
    }
}

/// Parses a strict `"HH:MM"` time of day.
///
/// # Example
///
/// ```
/// use work_tracker::models::parse_hhmm;
///
/// assert!(parse_hhmm("09:30").is_ok());
/// assert!(parse_hhmm("9:30").is_err());
/// assert!(parse_hhmm("24:00").is_err());
/// ```
pub fn parse_hhmm(value: &str) -> EngineResult<NaiveTime> {
    let invalid = || EngineError::InvalidShiftRule {
        message: format!("time '{}' is not in HH:MM form", value),
    };

    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }
    let digits_ok = [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
    if !digits_ok {
        return Err(invalid());
    }

    let hour: u32 = value[0..2].parse().map_err(|_| invalid())?;
    let minute: u32 = value[3..5].parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// Maps a Monday-based index to a weekday.
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Mon),
        1 => Some(Weekday::Tue),
        2 => Some(Weekday::Wed),
        3 => Some(Weekday::Thu),
        4 => Some(Weekday::Fri),
        5 => Some(Weekday::Sat),
        6 => Some(Weekday::Sun),
        _ => None,
    }
}

/// Full English weekday name.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Drops seconds and sub-second precision.
pub(crate) fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

mod weekday_index {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(weekday.num_days_from_monday() as u8)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let index = u8::deserialize(deserializer)?;
        super::weekday_from_index(index)
            .ok_or_else(|| D::Error::custom(format!("invalid weekday index {}", index)))
    }
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw).map_err(D::Error::custom)
    }
}
