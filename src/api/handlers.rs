//! HTTP request handlers for the work tracker API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    ItalianHolidays, check_interval, compute_pay_breakdown, render_text_report, summarize_month,
};
use crate::config::{RateConfig, RateOverrides, SettingsStore};
use crate::error::EngineError;
use crate::models::{ShiftRuleDraft, YearMonth};
use crate::tracker::StopOutcome;

use super::request::{CalculationRequest, SessionsQuery};
use super::response::{ApiError, ApiErrorResponse, StopResponse, TrackerStatus};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/tracker", get(tracker_status_handler))
        .route("/tracker/start", post(start_tracking_handler))
        .route("/tracker/stop", post(stop_tracking_handler))
        .route("/shifts", get(list_shifts_handler).post(create_shift_handler))
        .route("/shifts/:id", delete(delete_shift_handler))
        .route(
            "/settings",
            get(get_settings_handler).put(update_settings_handler),
        )
        .route("/sessions", get(list_sessions_handler))
        .route("/sessions/:id", delete(delete_session_handler))
        .route("/reports/:month", get(monthly_report_handler))
        .route("/reports/:month/text", get(text_report_handler))
        .route("/holidays/:year", get(holidays_handler))
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Maps a JSON body rejection to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for GET /tracker.
async fn tracker_status_handler(State(state): State<AppState>) -> Response {
    let now = state.clock().now_local_naive();
    let workspace = state.workspace().await;
    json_response(StatusCode::OK, TrackerStatus::at(workspace.tracker.state(), now))
}

/// Handler for POST /tracker/start.
async fn start_tracking_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let now = state.clock().now_local_naive();
    let mut workspace = state.workspace().await;

    match workspace.tracker.start(now) {
        Ok(()) => {
            info!(correlation_id = %correlation_id, start = %now, "Tracking started");
            json_response(StatusCode::OK, TrackerStatus::at(workspace.tracker.state(), now))
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /tracker/stop.
///
/// Prices the open session with the current settings and schedule and
/// records it, unless it lasted under a minute.
async fn stop_tracking_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let now = state.clock().now_local_naive();
    let mut guard = state.workspace().await;
    let workspace = &mut *guard;

    let config = match RateConfig::from_store(&workspace.settings) {
        Ok(config) => config,
        Err(err) => return error_response(correlation_id, err),
    };

    let outcome = match workspace
        .tracker
        .stop(now, &config, state.holidays(), &workspace.schedule)
    {
        Ok(outcome) => outcome,
        Err(err) => return error_response(correlation_id, err),
    };

    match outcome {
        StopOutcome::Recorded(session) => {
            let session = workspace.log.record(session);
            info!(
                correlation_id = %correlation_id,
                session_id = session.id,
                minutes = session.total_minutes,
                total_pay = %session.total_pay,
                "Session recorded"
            );
            json_response(
                StatusCode::OK,
                StopResponse {
                    recorded: true,
                    session: Some(session),
                },
            )
        }
        StopOutcome::Discarded { start, end } => {
            info!(
                correlation_id = %correlation_id,
                %start,
                %end,
                "Session discarded"
            );
            json_response(
                StatusCode::OK,
                StopResponse {
                    recorded: false,
                    session: None,
                },
            )
        }
    }
}

/// Handler for GET /shifts.
async fn list_shifts_handler(State(state): State<AppState>) -> Response {
    let workspace = state.workspace().await;
    json_response(StatusCode::OK, workspace.schedule.rules())
}

/// Handler for POST /shifts.
async fn create_shift_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftRuleDraft>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let draft = match payload {
        Ok(Json(draft)) => draft,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let mut workspace = state.workspace().await;
    match workspace.schedule.add_draft(&draft) {
        Ok(rule) => {
            info!(correlation_id = %correlation_id, rule_id = rule.id, rule = %rule, "Shift rule added");
            json_response(StatusCode::CREATED, rule)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for DELETE /shifts/:id.
async fn delete_shift_handler(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let correlation_id = Uuid::new_v4();
    let mut workspace = state.workspace().await;
    match workspace.schedule.remove_rule(id) {
        Ok(rule) => {
            info!(correlation_id = %correlation_id, rule_id = rule.id, "Shift rule removed");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /settings.
async fn get_settings_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let workspace = state.workspace().await;
    match RateConfig::from_store(&workspace.settings) {
        Ok(config) => json_response(StatusCode::OK, config),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /settings.
///
/// Applies a partial update. The merged configuration is validated before
/// anything is stored, so a rejected update leaves every setting unchanged.
async fn update_settings_handler(
    State(state): State<AppState>,
    payload: Result<Json<RateOverrides>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let overrides = match payload {
        Ok(Json(overrides)) => overrides,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let mut workspace = state.workspace().await;
    let merged = RateConfig::from_store(&workspace.settings).and_then(|current| {
        let merged = overrides.apply_to(&current);
        merged.validate()?;
        Ok(merged)
    });

    match merged {
        Ok(config) => {
            workspace.settings.write_config(&config);
            info!(correlation_id = %correlation_id, settings = ?overrides, "Settings updated");
            json_response(StatusCode::OK, config)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /sessions.
async fn list_sessions_handler(
    State(state): State<AppState>,
    Query(query): Query<SessionsQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let month = match query.month.as_deref() {
        Some(value) => match value.parse::<YearMonth>() {
            Ok(month) => month,
            Err(err) => return error_response(correlation_id, err),
        },
        None => YearMonth::of(state.clock().now_local_naive()),
    };

    let workspace = state.workspace().await;
    json_response(StatusCode::OK, workspace.log.sessions_in_month(month))
}

/// Handler for DELETE /sessions/:id.
async fn delete_session_handler(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let correlation_id = Uuid::new_v4();
    let mut workspace = state.workspace().await;
    match workspace.log.delete(id) {
        Ok(session) => {
            info!(correlation_id = %correlation_id, session_id = session.id, "Session deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /reports/:month.
async fn monthly_report_handler(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let month: YearMonth = match month.parse() {
        Ok(month) => month,
        Err(err) => return error_response(correlation_id, err),
    };

    let workspace = state.workspace().await;
    json_response(StatusCode::OK, summarize_month(&workspace.log, month))
}

/// Handler for GET /reports/:month/text.
async fn text_report_handler(State(state): State<AppState>, Path(month): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    let month: YearMonth = match month.parse() {
        Ok(month) => month,
        Err(err) => return error_response(correlation_id, err),
    };

    let workspace = state.workspace().await;
    let report = render_text_report(&summarize_month(&workspace.log, month));
    info!(correlation_id = %correlation_id, %month, "Rendered text report");
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        report,
    )
        .into_response()
}

/// Handler for GET /holidays/:year.
async fn holidays_handler(Path(year): Path<i32>) -> Response {
    json_response(StatusCode::OK, ItalianHolidays::holidays_for_year(year))
}

/// Handler for POST /calculate endpoint.
///
/// Accepts an interval of at most 31 days and returns its pay breakdown.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(err) = check_interval(request.start, request.end) {
        return error_response(correlation_id, err);
    }

    let workspace = state.workspace().await;
    let config = RateConfig::from_store(&workspace.settings).and_then(|stored| {
        let config = match &request.settings {
            Some(overrides) => overrides.apply_to(&stored),
            None => stored,
        };
        config.validate()?;
        Ok(config)
    });
    let config = match config {
        Ok(config) => config,
        Err(err) => return error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    let breakdown = compute_pay_breakdown(
        request.start,
        request.end,
        &config,
        state.holidays(),
        &workspace.schedule,
    );
    info!(
        correlation_id = %correlation_id,
        minutes = breakdown.total_minutes,
        total_pay = %breakdown.total_pay,
        duration_us = start_time.elapsed().as_micros(),
        "Calculation completed successfully"
    );

    json_response(StatusCode::OK, breakdown)
}
