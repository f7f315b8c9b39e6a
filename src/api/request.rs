//! Request types for the work tracker API.
//!
//! Shift rules and settings updates reuse
//! [`ShiftRuleDraft`](crate::models::ShiftRuleDraft) and
//! [`RateOverrides`](crate::config::RateOverrides) as their JSON bodies.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::RateOverrides;

/// Request body for the `/calculate` endpoint.
///
/// Prices an arbitrary interval against the stored schedule and settings
/// without recording anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// First minute of the interval.
    pub start: NaiveDateTime,
    /// Exclusive end of the interval.
    pub end: NaiveDateTime,
    /// Settings to use instead of the stored ones for this calculation only.
    #[serde(default)]
    pub settings: Option<RateOverrides>,
}

/// Query string of `GET /sessions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionsQuery {
    /// Month as `YYYY-MM`; the current month when absent.
    #[serde(default)]
    pub month: Option<String>,
}
