//! Configuration loading and management for the work tracker.
//!
//! This module provides the typed [`RateConfig`] the pay calculator reads,
//! the string-keyed [`SettingsStore`] it is persisted in, and the
//! [`ConfigLoader`] that seeds both from a YAML file.
//!
//! # Example
//!
//! ```
//! use work_tracker::config::{MemorySettingsStore, RateConfig};
//!
//! let store = MemorySettingsStore::with_defaults();
//! let config = RateConfig::from_store(&store).unwrap();
//! assert_eq!(config.night_start_hour, 22);
//! ```

mod loader;
mod store;
mod types;

pub use loader::ConfigLoader;
pub use store::{MemorySettingsStore, SettingsStore};
pub use types::{RateConfig, RateOverrides, SettingKey};
