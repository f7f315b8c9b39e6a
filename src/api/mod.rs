//! HTTP API module for the work tracker.
//!
//! This module provides the REST endpoints for clocking in and out, managing
//! the shift schedule and settings, browsing sessions and monthly reports,
//! and pricing arbitrary intervals.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, SessionsQuery};
pub use response::{ApiError, StopResponse, TrackerStatus};
pub use state::{AppState, Workspace};
