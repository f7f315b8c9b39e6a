//! Monthly totals and the plain-text statement.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::models::{WorkSession, YearMonth, format_minutes};
use crate::tracker::SessionLog;

const REPORT_RULE_WIDTH: usize = 40;

/// Sessions and totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// The month summarized.
    pub month: YearMonth,
    /// Sessions that started in the month, newest first.
    pub sessions: Vec<WorkSession>,
    /// Sum of the stored session pay.
    pub total_pay: Decimal,
    /// Sum of the session minutes.
    pub total_minutes: i64,
}

impl MonthlySummary {
    /// Total worked time as `"Xh Ym"`.
    pub fn hours_label(&self) -> String {
        format_minutes(self.total_minutes)
    }
}

/// Collects the sessions of `month` from `log` and totals them.
///
/// Totals are sums of the amounts stored on each session; nothing is
/// recomputed, so later settings changes do not alter past months.
pub fn summarize_month(log: &SessionLog, month: YearMonth) -> MonthlySummary {
    let sessions = log.sessions_in_month(month);
    let total_pay = sessions.iter().map(|s| s.total_pay).sum();
    let total_minutes = sessions.iter().map(|s| s.total_minutes).sum();

    MonthlySummary {
        month,
        sessions,
        total_pay,
        total_minutes,
    }
}

/// Renders `summary` as a plain-text statement, newest session first.
///
/// # Example
///
/// ```
/// use work_tracker::calculation::{render_text_report, MonthlySummary};
/// use work_tracker::models::YearMonth;
/// use rust_decimal::Decimal;
///
/// let summary = MonthlySummary {
///     month: "2024-03".parse().unwrap(),
///     sessions: vec![],
///     total_pay: Decimal::ZERO,
///     total_minutes: 0,
/// };
/// let report = render_text_report(&summary);
/// assert!(report.starts_with("Work report 2024-03"));
/// assert!(report.contains("No sessions recorded"));
/// ```
pub fn render_text_report(summary: &MonthlySummary) -> String {
    let mut out = String::new();
    let rule = "-".repeat(REPORT_RULE_WIDTH);

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Work report {}", summary.month);
    let _ = writeln!(out, "{}", rule);

    if summary.sessions.is_empty() {
        let _ = writeln!(out, "No sessions recorded");
    }
    for session in &summary.sessions {
        let _ = writeln!(
            out,
            "{}  {}-{}  {:>8}  {:>9} EUR",
            session.start_time.format("%a %d/%m"),
            session.start_time.format("%H:%M"),
            session.end_time.format("%H:%M"),
            session.duration_label(),
            session.total_pay,
        );
    }

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "Total  {}  {} EUR",
        summary.hours_label(),
        summary.total_pay
    );
    out
}
