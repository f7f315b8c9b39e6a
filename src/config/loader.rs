//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tracker
//! configuration from a YAML file.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::calculation::ShiftSchedule;
use crate::error::{EngineError, EngineResult};
use crate::models::ShiftRuleDraft;

use super::store::SettingsStore;
use super::types::{RateConfig, RateOverrides};

/// On-disk layout of the tracker configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TrackerFile {
    #[serde(default)]
    settings: RateOverrides,
    #[serde(default)]
    shifts: Vec<ShiftRuleDraft>,
}

/// Loads the seed configuration for a tracker instance.
///
/// The file holds optional setting overrides and the initial weekly shift
/// schedule:
///
/// ```yaml
/// settings:
///   hourly_rate: "9.20"
///   night_start_hour: 22
/// shifts:
///   - weekday: 0
///     start: "09:00"
///     end: "18:00"
/// ```
///
/// Settings missing from the file keep the store's defaults.
///
/// # Example
///
/// ```no_run
/// use work_tracker::config::{ConfigLoader, MemorySettingsStore};
/// use work_tracker::calculation::ShiftSchedule;
///
/// let loader = ConfigLoader::load("./config/tracker.yaml")?;
/// let mut settings = MemorySettingsStore::with_defaults();
/// let mut schedule = ShiftSchedule::new();
/// loader.apply(&mut settings, &mut schedule)?;
/// # Ok::<(), work_tracker::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    overrides: RateOverrides,
    shifts: Vec<ShiftRuleDraft>,
}

impl ConfigLoader {
    /// Loads configuration from the YAML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if the file cannot be read
    /// - [`EngineError::ConfigParseError`] if the YAML is invalid or has unknown keys
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses configuration from YAML text. `origin` is used in error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> EngineResult<Self> {
        let file: TrackerFile =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        info!(
            origin,
            overrides = !file.settings.is_empty(),
            shifts = file.shifts.len(),
            "Loaded tracker configuration"
        );

        Ok(Self {
            overrides: file.settings,
            shifts: file.shifts,
        })
    }

    /// The setting overrides found in the file.
    pub fn overrides(&self) -> &RateOverrides {
        &self.overrides
    }

    /// The shift rules found in the file, not yet validated.
    pub fn shifts(&self) -> &[ShiftRuleDraft] {
        &self.shifts
    }

    /// Writes the overrides into `settings` and adds the shifts to `schedule`.
    ///
    /// The store is initialized with defaults first. The merged rate
    /// configuration is validated before anything is written, and every shift
    /// is validated before any is added.
    pub fn apply<S: SettingsStore + ?Sized>(
        &self,
        settings: &mut S,
        schedule: &mut ShiftSchedule,
    ) -> EngineResult<()> {
        settings.initialize_defaults();

        if !self.overrides.is_empty() {
            let current = RateConfig::from_store(settings)?;
            let merged = self.overrides.apply_to(&current);
            merged.validate()?;
            settings.write_config(&merged);
        }

        for draft in &self.shifts {
            draft.parse()?;
        }
        for draft in &self.shifts {
            schedule.add_draft(draft)?;
        }

        Ok(())
    }
}
