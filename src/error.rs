//! Error types for the work tracker.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the tracker can report: configuration integrity,
//! invalid shift rules, and session state violations.

use chrono::NaiveDateTime;
use thiserror::Error;

/// The main error type for the work tracker.
///
/// All fallible operations return this error type, so the HTTP layer can map
/// each variant to a stable error code.
///
/// # Example
///
/// ```
/// use work_tracker::error::EngineError;
///
/// let error = EngineError::MissingSetting {
///     key: "hourly_rate".to_string(),
/// };
/// assert_eq!(error.to_string(), "Missing required setting: hourly_rate");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A required setting is absent from the settings store.
    #[error("Missing required setting: {key}")]
    MissingSetting {
        /// The setting key that was absent.
        key: String,
    },

    /// A stored setting could not be interpreted.
    #[error("Invalid value '{value}' for setting '{key}': {message}")]
    InvalidSetting {
        /// The setting key.
        key: String,
        /// The raw stored value.
        value: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A shift rule was rejected when it was written.
    #[error("Invalid shift rule: {message}")]
    InvalidShiftRule {
        /// A description of what made the rule invalid.
        message: String,
    },

    /// No shift rule exists with the given id.
    #[error("Shift rule not found: {id}")]
    ShiftRuleNotFound {
        /// The id that was looked up.
        id: u64,
    },

    /// No finalized work session exists with the given id.
    #[error("Work session not found: {id}")]
    SessionNotFound {
        /// The id that was looked up.
        id: u64,
    },

    /// A session is already open.
    #[error("Already tracking since {since}")]
    AlreadyTracking {
        /// Start of the open session.
        since: NaiveDateTime,
    },

    /// Stop was requested while no session is open.
    #[error("No session is being tracked")]
    NotTracking,

    /// An interval is too long to be priced on request.
    #[error("Interval of {minutes} minutes exceeds the limit of {max_minutes} minutes")]
    IntervalTooLong {
        /// Length of the rejected interval.
        minutes: i64,
        /// The largest accepted length.
        max_minutes: i64,
    },

    /// A month string was not in `YYYY-MM` form.
    #[error("Invalid month '{value}': expected YYYY-MM")]
    InvalidMonth {
        /// The rejected input.
        value: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
