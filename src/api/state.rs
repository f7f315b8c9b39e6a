//! Application state for the work tracker API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::calculation::{HolidaySource, ItalianHolidays, ShiftSchedule};
use crate::config::{ConfigLoader, MemorySettingsStore};
use crate::error::EngineResult;
use crate::tracker::{Clock, SessionLog, Tracker};

/// Everything a request may read or change, guarded by one lock.
#[derive(Debug, Default)]
pub struct Workspace {
    /// Stored rate settings.
    pub settings: MemorySettingsStore,
    /// Weekly shift schedule.
    pub schedule: ShiftSchedule,
    /// Open-session state machine.
    pub tracker: Tracker,
    /// Finalized sessions.
    pub log: SessionLog,
}

impl Workspace {
    /// Creates a workspace with default settings and no shifts.
    pub fn new() -> Self {
        Self {
            settings: MemorySettingsStore::with_defaults(),
            schedule: ShiftSchedule::new(),
            tracker: Tracker::new(),
            log: SessionLog::new(),
        }
    }

    /// Creates a workspace seeded from `loader`.
    pub fn from_config(loader: &ConfigLoader) -> EngineResult<Self> {
        let mut settings = MemorySettingsStore::new();
        let mut schedule = ShiftSchedule::new();
        loader.apply(&mut settings, &mut schedule)?;

        Ok(Self {
            settings,
            schedule,
            tracker: Tracker::new(),
            log: SessionLog::new(),
        })
    }
}

/// Shared application state.
///
/// Cloning is cheap: clones share the same workspace, clock and holiday
/// calendar.
#[derive(Clone)]
pub struct AppState {
    workspace: Arc<Mutex<Workspace>>,
    clock: Arc<dyn Clock>,
    holidays: Arc<dyn HolidaySource + Send + Sync>,
}

impl AppState {
    /// Creates a state over `workspace` using the Italian holiday calendar.
    pub fn new(workspace: Workspace, clock: Arc<dyn Clock>) -> Self {
        Self::with_holidays(workspace, clock, Arc::new(ItalianHolidays))
    }

    /// Creates a state with an explicit holiday calendar.
    pub fn with_holidays(
        workspace: Workspace,
        clock: Arc<dyn Clock>,
        holidays: Arc<dyn HolidaySource + Send + Sync>,
    ) -> Self {
        Self {
            workspace: Arc::new(Mutex::new(workspace)),
            clock,
            holidays,
        }
    }

    /// Locks the workspace for the duration of a request.
    pub async fn workspace(&self) -> MutexGuard<'_, Workspace> {
        self.workspace.lock().await
    }

    /// The clock used to timestamp sessions.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// The holiday calendar used for pay.
    pub fn holidays(&self) -> &(dyn HolidaySource + Send + Sync) {
        self.holidays.as_ref()
    }
}
