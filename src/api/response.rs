//! Response types for the work tracker API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API, plus the bodies returned by the tracker endpoints.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::WorkSession;
use crate::tracker::TrackerState;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn new(status: StatusCode, code: &str, error: &EngineError) -> Self {
        Self {
            status,
            error: ApiError::new(code, error.to_string()),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match &error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details(
                        "CONFIG_ERROR",
                        "Configuration error",
                        error.to_string(),
                    ),
                }
            }
            EngineError::MissingSetting { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Stored settings are incomplete",
                    error.to_string(),
                ),
            },
            EngineError::InvalidSetting { .. } => {
                ApiErrorResponse::new(StatusCode::BAD_REQUEST, "INVALID_SETTING", &error)
            }
            EngineError::InvalidShiftRule { .. } => {
                ApiErrorResponse::new(StatusCode::BAD_REQUEST, "INVALID_SHIFT_RULE", &error)
            }
            EngineError::IntervalTooLong { .. } => {
                ApiErrorResponse::new(StatusCode::BAD_REQUEST, "INTERVAL_TOO_LONG", &error)
            }
            EngineError::InvalidMonth { .. } => {
                ApiErrorResponse::new(StatusCode::BAD_REQUEST, "INVALID_MONTH", &error)
            }
            EngineError::ShiftRuleNotFound { .. } => {
                ApiErrorResponse::new(StatusCode::NOT_FOUND, "SHIFT_RULE_NOT_FOUND", &error)
            }
            EngineError::SessionNotFound { .. } => {
                ApiErrorResponse::new(StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", &error)
            }
            EngineError::AlreadyTracking { .. } => {
                ApiErrorResponse::new(StatusCode::CONFLICT, "ALREADY_TRACKING", &error)
            }
            EngineError::NotTracking => {
                ApiErrorResponse::new(StatusCode::CONFLICT, "NOT_TRACKING", &error)
            }
        }
    }
}

/// Body of `GET /tracker` and `POST /tracker/start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerStatus {
    /// Current tracker state.
    #[serde(flatten)]
    pub state: TrackerState,
    /// Local time the status was taken.
    pub now: NaiveDateTime,
    /// Whole minutes elapsed in the open session.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub elapsed_minutes: Option<i64>,
}

impl TrackerStatus {
    /// Builds the status of `state` as seen at `now`.
    pub fn at(state: TrackerState, now: NaiveDateTime) -> Self {
        let elapsed_minutes = match state {
            TrackerState::Tracking { start } => Some((now - start).num_minutes().max(0)),
            TrackerState::Idle => None,
        };
        Self {
            state,
            now,
            elapsed_minutes,
        }
    }
}

/// Body of `POST /tracker/stop`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopResponse {
    /// False when the session was under a minute and dropped.
    pub recorded: bool,
    /// The stored session, when recorded.
    pub session: Option<WorkSession>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_engine_error_status_codes() {
        let cases = [
            (EngineError::NotTracking, StatusCode::CONFLICT, "NOT_TRACKING"),
            (
                EngineError::SessionNotFound { id: 4 },
                StatusCode::NOT_FOUND,
                "SESSION_NOT_FOUND",
            ),
            (
                EngineError::InvalidMonth {
                    value: "2024-13".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "INVALID_MONTH",
            ),
            (
                EngineError::IntervalTooLong {
                    minutes: 50_000,
                    max_minutes: 44_640,
                },
                StatusCode::BAD_REQUEST,
                "INTERVAL_TOO_LONG",
            ),
            (
                EngineError::MissingSetting {
                    key: "hourly_rate".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
            ),
        ];

        for (engine_error, status, code) in cases {
            let api_error: ApiErrorResponse = engine_error.into();
            assert_eq!(api_error.status, status);
            assert_eq!(api_error.error.code, code);
        }
    }

    #[test]
    fn test_tracker_status_reports_elapsed_minutes() {
        let start = NaiveDateTime::parse_from_str("2024-03-04 09:00", "%Y-%m-%d %H:%M").unwrap();
        let now = start + chrono::Duration::seconds(125);

        let status = TrackerStatus::at(TrackerState::Tracking { start }, now);
        assert_eq!(status.elapsed_minutes, Some(2));

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["state"], "tracking");
        assert_eq!(json["start"], "2024-03-04T09:00:00");

        let idle = TrackerStatus::at(TrackerState::Idle, now);
        let json = serde_json::to_value(&idle).unwrap();
        assert_eq!(json["state"], "idle");
        assert!(json.get("elapsed_minutes").is_none());
    }
}
