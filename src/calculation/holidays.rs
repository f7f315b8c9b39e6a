//! Public holiday lookup.
//!
//! The pay calculator only needs to know whether a date is a public holiday.
//! [`ItalianHolidays`] answers that from the Italian national calendar;
//! [`HolidayList`] answers it from an explicit table.

use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

use crate::models::PublicHoliday;

/// A date -> is-holiday lookup.
pub trait HolidaySource {
    /// Returns true if `date` is a public holiday.
    fn contains(&self, date: NaiveDate) -> bool;
}

/// First year in which St. Francis of Assisi (4 October) is a national holiday.
pub const ST_FRANCIS_FIRST_YEAR: i32 = 2026;

const FIXED_HOLIDAYS: [(u32, u32, &str); 10] = [
    (1, 1, "New Year's Day"),
    (1, 6, "Epiphany"),
    (4, 25, "Liberation Day"),
    (5, 1, "Labour Day"),
    (6, 2, "Republic Day"),
    (8, 15, "Assumption Day"),
    (11, 1, "All Saints' Day"),
    (12, 8, "Immaculate Conception"),
    (12, 25, "Christmas Day"),
    (12, 26, "St. Stephen's Day"),
];

/// The Italian national public holiday calendar.
///
/// # Example
///
/// ```
/// use work_tracker::calculation::{HolidaySource, ItalianHolidays};
/// use chrono::NaiveDate;
///
/// let holidays = ItalianHolidays;
/// assert!(holidays.contains(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()));
/// // Easter Monday 2024
/// assert!(holidays.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
/// assert!(!holidays.contains(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ItalianHolidays;

impl ItalianHolidays {
    /// Every national holiday in `year`, in date order.
    pub fn holidays_for_year(year: i32) -> Vec<PublicHoliday> {
        let mut holidays: Vec<PublicHoliday> = FIXED_HOLIDAYS
            .iter()
            .filter_map(|&(month, day, name)| {
                NaiveDate::from_ymd_opt(year, month, day).map(|date| PublicHoliday {
                    date,
                    name: name.to_string(),
                })
            })
            .collect();

        if year >= ST_FRANCIS_FIRST_YEAR {
            if let Some(date) = NaiveDate::from_ymd_opt(year, 10, 4) {
                holidays.push(PublicHoliday {
                    date,
                    name: "St. Francis of Assisi".to_string(),
                });
            }
        }

        if let Some(easter) = easter_sunday(year) {
            holidays.push(PublicHoliday {
                date: easter,
                name: "Easter Sunday".to_string(),
            });
            holidays.push(PublicHoliday {
                date: easter + Duration::days(1),
                name: "Easter Monday".to_string(),
            });
        }

        holidays.sort_by_key(|h| h.date);
        holidays
    }
}

impl HolidaySource for ItalianHolidays {
    fn contains(&self, date: NaiveDate) -> bool {
        let (month, day) = (date.month(), date.day());

        if FIXED_HOLIDAYS.iter().any(|&(m, d, _)| m == month && d == day) {
            return true;
        }
        if month == 10 && day == 4 && date.year() >= ST_FRANCIS_FIRST_YEAR {
            return true;
        }

        match easter_sunday(date.year()) {
            Some(easter) => date == easter || date == easter + Duration::days(1),
            None => false,
        }
    }
}

/// Date of Easter Sunday in the Gregorian calendar.
///
/// Uses the anonymous Gregorian computus. Returns `None` only for years
/// chrono cannot represent.
///
/// # Example
///
/// ```
/// use work_tracker::calculation::easter_sunday;
/// use chrono::NaiveDate;
///
/// assert_eq!(easter_sunday(2024), NaiveDate::from_ymd_opt(2024, 3, 31));
/// assert_eq!(easter_sunday(2025), NaiveDate::from_ymd_opt(2025, 4, 20));
/// ```
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b.div_euclid(4);
    let e = b.rem_euclid(4);
    let f = (b + 8).div_euclid(25);
    let g = (b - f + 1).div_euclid(3);
    let h = (19 * a + b - d - g + 15).rem_euclid(30);
    let i = c.div_euclid(4);
    let k = c.rem_euclid(4);
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l).div_euclid(451);
    let n = h + l - 7 * m + 114;

    let month = u32::try_from(n / 31).ok()?;
    let day = u32::try_from(n % 31 + 1).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// A holiday source backed by an explicit list of dates.
#[derive(Debug, Clone, Default)]
pub struct HolidayList {
    holidays: BTreeMap<NaiveDate, String>,
}

impl HolidayList {
    /// Creates an empty list: no day is a holiday.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a holiday, replacing any existing entry for the same date.
    pub fn insert(&mut self, holiday: PublicHoliday) {
        self.holidays.insert(holiday.date, holiday.name);
    }

    /// The holidays in date order.
    pub fn holidays(&self) -> Vec<PublicHoliday> {
        self.holidays
            .iter()
            .map(|(date, name)| PublicHoliday {
                date: *date,
                name: name.clone(),
            })
            .collect()
    }
}

impl FromIterator<PublicHoliday> for HolidayList {
    fn from_iter<I: IntoIterator<Item = PublicHoliday>>(iter: I) -> Self {
        let mut list = Self::new();
        for holiday in iter {
            list.insert(holiday);
        }
        list
    }
}

impl HolidaySource for HolidayList {
    fn contains(&self, date: NaiveDate) -> bool {
        self.holidays.contains_key(&date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_easter_dates() {
        let known = [
            (2000, 4, 23),
            (2019, 4, 21),
            (2020, 4, 12),
            (2023, 4, 9),
            (2024, 3, 31),
            (2025, 4, 20),
            (2026, 4, 5),
            (2038, 4, 25),
        ];
        for (y, m, d) in known {
            assert_eq!(easter_sunday(y), Some(date(y, m, d)), "Easter {}", y);
        }
    }

    #[test]
    fn test_fixed_holidays_are_detected() {
        let holidays = ItalianHolidays;
        for (m, d, name) in FIXED_HOLIDAYS {
            assert!(holidays.contains(date(2024, m, d)), "{} not detected", name);
        }
    }

    #[test]
    fn test_easter_sunday_and_monday_are_holidays() {
        let holidays = ItalianHolidays;
        assert!(holidays.contains(date(2024, 3, 31)));
        assert!(holidays.contains(date(2024, 4, 1)));
        assert!(!holidays.contains(date(2024, 4, 2)));
        assert!(!holidays.contains(date(2024, 3, 30)));
    }

    #[test]
    fn test_st_francis_only_from_2026() {
        let holidays = ItalianHolidays;
        assert!(!holidays.contains(date(2025, 10, 4)));
        assert!(holidays.contains(date(2026, 10, 4)));
    }

    #[test]
    fn test_ordinary_days_are_not_holidays() {
        let holidays = ItalianHolidays;
        assert!(!holidays.contains(date(2024, 3, 4)));
        assert!(!holidays.contains(date(2024, 8, 14)));
        assert!(!holidays.contains(date(2024, 12, 24)));
    }

    #[test]
    fn test_holidays_for_year_is_sorted_and_complete() {
        let list = ItalianHolidays::holidays_for_year(2024);
        assert_eq!(list.len(), 12);
        assert!(list.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(list[0].name, "New Year's Day");
        assert_eq!(list.last().unwrap().name, "St. Stephen's Day");

        assert_eq!(ItalianHolidays::holidays_for_year(2026).len(), 13);
    }

    #[test]
    fn test_holidays_for_year_agrees_with_contains() {
        let holidays = ItalianHolidays;
        for holiday in ItalianHolidays::holidays_for_year(2027) {
            assert!(holidays.contains(holiday.date), "{}", holiday);
        }
    }

    #[test]
    fn test_holiday_list() {
        let list: HolidayList = vec![PublicHoliday {
            date: date(2024, 3, 4),
            name: "Company Day".to_string(),
        }]
        .into_iter()
        .collect();

        assert!(list.contains(date(2024, 3, 4)));
        assert!(!list.contains(date(2024, 12, 25)));
        assert_eq!(list.holidays().len(), 1);
        assert!(!HolidayList::new().contains(date(2024, 3, 4)));
    }
}
