//! Core data models for the work tracker.
//!
//! This module contains all the domain models used throughout the crate.

mod holiday;
mod month;
mod pay_breakdown;
mod shift_rule;
mod work_session;

pub use holiday::PublicHoliday;
pub use month::YearMonth;
pub use pay_breakdown::{PayBreakdown, PayCategory, PaySegment};
pub use shift_rule::{
    ShiftRule, ShiftRuleDraft, parse_hhmm, weekday_from_index, weekday_name,
};
pub use work_session::{WorkSession, format_minutes};
