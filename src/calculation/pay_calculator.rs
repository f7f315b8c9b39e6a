//! Minute-resolution pay calculation.
//!
//! Pay for an interval is accrued one minute at a time. Each minute starting
//! at `cursor` is classified independently (night window, public holiday,
//! Sunday, scheduled shift) and earns `hourly_rate / 60` times the sum of the
//! applicable multipliers. The interval is half-open: the minute starting at
//! `end` is never paid.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Weekday};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::config::RateConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{PayBreakdown, PayCategory, PaySegment};

use super::holidays::HolidaySource;
use super::night_window::is_night_hour;
use super::schedule::ScheduleLookup;

/// How a single worked minute is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinuteClass {
    /// The minute lies inside a scheduled shift.
    pub in_shift: bool,
    /// The minute lies inside the night window.
    pub is_night: bool,
    /// The minute falls on a public holiday.
    pub is_holiday: bool,
    /// The minute falls on a Sunday.
    pub is_sunday: bool,
}

impl MinuteClass {
    /// Schedule/time-of-day category of the minute.
    pub fn category(&self) -> PayCategory {
        PayCategory::from_flags(self.in_shift, self.is_night)
    }

    /// Combined multiplier for the minute under `config`.
    ///
    /// # Example
    ///
    /// ```
    /// use work_tracker::calculation::MinuteClass;
    /// use work_tracker::config::RateConfig;
    /// use rust_decimal::Decimal;
    ///
    /// let class = MinuteClass { in_shift: false, is_night: true, is_holiday: false, is_sunday: false };
    /// assert_eq!(class.multiplier(&RateConfig::default()), Decimal::new(150, 2));
    /// ```
    pub fn multiplier(&self, config: &RateConfig) -> Decimal {
        Multipliers::from_config(config).for_class(*self)
    }
}

/// Bonus fractions derived once from a [`RateConfig`].
#[derive(Debug, Clone, Copy)]
struct Multipliers {
    night_in_shift: Decimal,
    holiday: Decimal,
    sunday_in_shift: Decimal,
    day_overtime: Decimal,
    night_overtime: Decimal,
}

impl Multipliers {
    fn from_config(config: &RateConfig) -> Self {
        let fraction = |percent: Decimal| percent / Decimal::ONE_HUNDRED;
        Self {
            night_in_shift: fraction(config.night_in_shift_bonus),
            holiday: fraction(config.holiday_bonus),
            sunday_in_shift: fraction(config.sunday_in_shift_bonus),
            day_overtime: fraction(config.day_overtime_bonus),
            night_overtime: fraction(config.night_overtime_bonus),
        }
    }

    fn for_class(&self, class: MinuteClass) -> Decimal {
        let mut multiplier = Decimal::ONE;

        if class.in_shift {
            if class.is_night {
                multiplier += self.night_in_shift;
            }
        } else if class.is_night {
            multiplier += self.night_overtime;
        } else {
            multiplier += self.day_overtime;
        }

        if class.is_holiday {
            multiplier += self.holiday;
        }
        if class.is_sunday && class.in_shift {
            multiplier += self.sunday_in_shift;
        }

        multiplier
    }
}

/// Classifies the minute starting at `cursor`.
pub fn classify_minute<H, S>(
    cursor: NaiveDateTime,
    config: &RateConfig,
    holidays: &H,
    schedule: &S,
) -> MinuteClass
where
    H: HolidaySource + ?Sized,
    S: ScheduleLookup + ?Sized,
{
    MinuteClass {
        in_shift: schedule.is_in_scheduled_shift(cursor),
        is_night: is_night_hour(config.night_start_hour, cursor.hour()),
        is_holiday: holidays.contains(cursor.date()),
        is_sunday: cursor.weekday() == Weekday::Sun,
    }
}

/// Walks `[start, end)` minute by minute, calling `visit` with each minute's
/// start, its end, class and accrued amount. Returns the unrounded total.
///
/// The walk stops early if a minute would end past the last representable
/// instant; that final minute ends at [`NaiveDateTime::MAX`].
fn accrue<H, S, F>(
    start: NaiveDateTime,
    end: NaiveDateTime,
    config: &RateConfig,
    holidays: &H,
    schedule: &S,
    mut visit: F,
) -> Decimal
where
    H: HolidaySource + ?Sized,
    S: ScheduleLookup + ?Sized,
    F: FnMut(NaiveDateTime, NaiveDateTime, MinuteClass, Decimal),
{
    let base_per_minute = config.base_per_minute();
    let multipliers = Multipliers::from_config(config);
    let step = Duration::minutes(1);

    let mut total = Decimal::ZERO;
    let mut next_minute = Some(start);
    // Holiday and Sunday status only change with the date.
    let mut current_day: Option<(NaiveDate, bool, bool)> = None;

    while let Some(cursor) = next_minute.filter(|minute| *minute < end) {
        let date = cursor.date();
        let (is_holiday, is_sunday) = match current_day {
            Some((day, holiday, sunday)) if day == date => (holiday, sunday),
            _ => {
                let holiday = holidays.contains(date);
                let sunday = date.weekday() == Weekday::Sun;
                current_day = Some((date, holiday, sunday));
                (holiday, sunday)
            }
        };

        let class = MinuteClass {
            in_shift: schedule.is_in_scheduled_shift(cursor),
            is_night: is_night_hour(config.night_start_hour, cursor.hour()),
            is_holiday,
            is_sunday,
        };

        let amount = base_per_minute * multipliers.for_class(class);
        total += amount;
        next_minute = cursor.checked_add_signed(step);
        visit(cursor, next_minute.unwrap_or(NaiveDateTime::MAX), class, amount);
    }

    total
}

/// Longest interval accepted for ad-hoc pricing: 31 days.
pub const MAX_INTERVAL_MINUTES: i64 = 31 * 24 * 60;

/// Rejects intervals longer than [`MAX_INTERVAL_MINUTES`].
///
/// Empty and inverted intervals pass; they simply price to zero.
///
/// # Example
///
/// ```
/// use work_tracker::calculation::check_interval;
/// use chrono::{Duration, NaiveDateTime};
///
/// let start = NaiveDateTime::parse_from_str("2024-03-04 09:00", "%Y-%m-%d %H:%M").unwrap();
/// assert!(check_interval(start, start + Duration::days(31)).is_ok());
/// assert!(check_interval(start, start + Duration::days(32)).is_err());
/// ```
pub fn check_interval(start: NaiveDateTime, end: NaiveDateTime) -> EngineResult<()> {
    let minutes = end.signed_duration_since(start).num_minutes();
    if minutes > MAX_INTERVAL_MINUTES {
        return Err(EngineError::IntervalTooLong {
            minutes,
            max_minutes: MAX_INTERVAL_MINUTES,
        });
    }
    Ok(())
}

/// Rounds a monetary amount to cents, halves away from zero.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes the pay earned over `[start, end)`.
///
/// Every minute beginning before `end` is paid in full, so callers that want
/// whole elapsed minutes only should truncate `end` first. An empty or
/// inverted interval yields zero.
///
/// # Example
///
/// ```
/// use work_tracker::calculation::{compute_pay, HolidayList, ShiftSchedule};
/// use work_tracker::config::RateConfig;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
///
/// // Three daytime overtime minutes on a Monday: 3 * 0.13 * 1.25 = 0.4875
/// let pay = compute_pay(
///     at("2024-03-04 09:00"),
///     at("2024-03-04 09:03"),
///     &RateConfig::default(),
///     &HolidayList::new(),
///     &ShiftSchedule::new(),
/// );
/// assert_eq!(pay, Decimal::new(49, 2));
/// ```
pub fn compute_pay<H, S>(
    start: NaiveDateTime,
    end: NaiveDateTime,
    config: &RateConfig,
    holidays: &H,
    schedule: &S,
) -> Decimal
where
    H: HolidaySource + ?Sized,
    S: ScheduleLookup + ?Sized,
{
    let mut minutes: i64 = 0;
    let total = accrue(start, end, config, holidays, schedule, |_, _, _, _| minutes += 1);
    let pay = round_to_cents(total);

    debug!(%start, %end, minutes, %pay, "Computed pay");
    pay
}

/// Computes the pay over `[start, end)` and explains it.
///
/// Consecutive minutes with the same classification are grouped into one
/// [`PaySegment`]. `total_pay` always equals [`compute_pay`] for the same
/// inputs.
pub fn compute_pay_breakdown<H, S>(
    start: NaiveDateTime,
    end: NaiveDateTime,
    config: &RateConfig,
    holidays: &H,
    schedule: &S,
) -> PayBreakdown
where
    H: HolidaySource + ?Sized,
    S: ScheduleLookup + ?Sized,
{
    let multipliers = Multipliers::from_config(config);

    let mut segments: Vec<PaySegment> = Vec::new();
    let mut open: Option<(MinuteClass, PaySegment)> = None;
    let mut total_minutes: i64 = 0;

    let total = accrue(start, end, config, holidays, schedule, |cursor, minute_end, class, amount| {
        total_minutes += 1;

        if let Some((current, segment)) = open.as_mut() {
            if *current == class && segment.end == cursor {
                segment.end = minute_end;
                segment.minutes += 1;
                segment.amount += amount;
                return;
            }
        }

        if let Some((_, finished)) = open.take() {
            segments.push(finished);
        }
        open = Some((
            class,
            PaySegment {
                start: cursor,
                end: minute_end,
                minutes: 1,
                category: class.category(),
                is_holiday: class.is_holiday,
                is_sunday: class.is_sunday,
                multiplier: multipliers.for_class(class),
                amount,
            },
        ));
    });

    if let Some((_, finished)) = open {
        segments.push(finished);
    }

    PayBreakdown {
        segments,
        total_minutes,
        total_pay: round_to_cents(total),
    }
}
