//! Calculation logic for the work tracker.
//!
//! This module contains the minute-resolution pay calculator and the
//! lookups it depends on: the night window, the weekly shift schedule and
//! the public holiday calendar. Monthly totals and the text statement are
//! built on top of finalized sessions.

mod holidays;
mod monthly_summary;
mod night_window;
mod pay_calculator;
mod schedule;

pub use holidays::{
    HolidayList, HolidaySource, ItalianHolidays, ST_FRANCIS_FIRST_YEAR, easter_sunday,
};
pub use monthly_summary::{MonthlySummary, render_text_report, summarize_month};
pub use night_window::{NIGHT_END_HOUR, is_night_hour};
pub use pay_calculator::{
    MAX_INTERVAL_MINUTES, MinuteClass, check_interval, classify_minute, compute_pay,
    compute_pay_breakdown, round_to_cents,
};
pub use schedule::{ScheduleLookup, ShiftSchedule};
