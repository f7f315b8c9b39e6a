//! Weekly shift schedule and the scheduled-shift lookup.
//!
//! The schedule answers one question for the pay calculator: is a given
//! instant inside a planned shift? Minutes outside every shift are overtime.

use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{ShiftRule, ShiftRuleDraft, weekday_from_index};

/// Answers whether an instant falls inside a scheduled shift.
pub trait ScheduleLookup {
    /// Returns true if any shift rule for the instant's weekday covers its
    /// `HH:MM` time of day.
    fn is_in_scheduled_shift(&self, instant: NaiveDateTime) -> bool;
}

/// The weekly shift schedule.
///
/// Rules are matched against the weekday of the instant being checked. A
/// wrapping rule such as `22:00-06:00` on Friday therefore covers Friday
/// 22:00-24:00 and Friday 00:00-06:00; the early hours of Saturday are only
/// scheduled if Saturday has its own rule.
///
/// # Example
///
/// ```
/// use work_tracker::calculation::{ScheduleLookup, ShiftSchedule};
/// use chrono::NaiveDateTime;
///
/// let mut schedule = ShiftSchedule::new();
/// schedule.add_rule(0, "09:00", "18:00").unwrap(); // Monday
///
/// // 2024-03-04 is a Monday
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// assert!(schedule.is_in_scheduled_shift(at("2024-03-04 09:00")));
/// assert!(!schedule.is_in_scheduled_shift(at("2024-03-04 18:00")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShiftSchedule {
    rules: Vec<ShiftRule>,
    next_id: u64,
}

impl ShiftSchedule {
    /// Creates an empty schedule: every minute is overtime.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            next_id: 1,
        }
    }

    /// Validates and adds a rule. `weekday` is 0..6 with Monday = 0; times
    /// must be strict `HH:MM`.
    ///
    /// Overlapping rules are accepted.
    pub fn add_rule(&mut self, weekday: u8, start: &str, end: &str) -> EngineResult<ShiftRule> {
        self.add_draft(&ShiftRuleDraft {
            weekday,
            start: start.to_string(),
            end: end.to_string(),
        })
    }

    /// Validates and adds a rule from its draft form.
    pub fn add_draft(&mut self, draft: &ShiftRuleDraft) -> EngineResult<ShiftRule> {
        let (weekday, start, end) = draft.parse()?;
        Ok(self.insert(weekday, start, end))
    }

    fn insert(&mut self, weekday: Weekday, start: NaiveTime, end: NaiveTime) -> ShiftRule {
        let id = self.next_id.max(1);
        self.next_id = id + 1;

        let rule = ShiftRule {
            id,
            weekday,
            start,
            end,
        };
        debug!(rule_id = id, rule = %rule, "Adding shift rule");

        self.rules.push(rule.clone());
        self.rules.sort_by_key(|r| (r.weekday.num_days_from_monday(), r.start, r.id));
        rule
    }

    /// Removes the rule with `id`.
    pub fn remove_rule(&mut self, id: u64) -> EngineResult<ShiftRule> {
        let index = self
            .rules
            .iter()
            .position(|r| r.id == id)
            .ok_or(EngineError::ShiftRuleNotFound { id })?;
        debug!(rule_id = id, "Removing shift rule");
        Ok(self.rules.remove(index))
    }

    /// All rules, ordered by weekday then start time.
    pub fn rules(&self) -> &[ShiftRule] {
        &self.rules
    }

    /// Rules for one weekday, ordered by start time.
    pub fn list_shifts(&self, weekday: Weekday) -> Vec<&ShiftRule> {
        self.rules.iter().filter(|r| r.weekday == weekday).collect()
    }

    /// Rules for a Monday-based weekday index; empty for an invalid index.
    pub fn list_shifts_by_index(&self, index: u8) -> Vec<&ShiftRule> {
        weekday_from_index(index)
            .map(|weekday| self.list_shifts(weekday))
            .unwrap_or_default()
    }
}

impl ScheduleLookup for ShiftSchedule {
    fn is_in_scheduled_shift(&self, instant: NaiveDateTime) -> bool {
        let weekday = instant.weekday();
        let time = instant.time();
        self.rules
            .iter()
            .filter(|r| r.weekday == weekday)
            .any(|r| r.covers(time))
    }
}
