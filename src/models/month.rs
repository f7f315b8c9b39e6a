//! Calendar month used to group sessions for reporting.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

/// A calendar month, written `YYYY-MM`.
///
/// # Example
///
/// ```
/// use work_tracker::models::YearMonth;
///
/// let month: YearMonth = "2024-03".parse().unwrap();
/// assert_eq!(month.to_string(), "2024-03");
/// assert!("2024-3".parse::<YearMonth>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a month, returning `None` for an out-of-range month number.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The month containing `datetime`.
    pub fn of(datetime: NaiveDateTime) -> Self {
        Self {
            year: datetime.year(),
            month: datetime.month(),
        }
    }

    /// Calendar year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Month number, 1-12.
    pub fn month(self) -> u32 {
        self.month
    }

    /// True when `datetime` falls in this month.
    pub fn contains(self, datetime: NaiveDateTime) -> bool {
        Self::of(datetime) == self
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(value: &str) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidMonth {
            value: value.to_string(),
        };

        let (year, month) = value.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
