//! Configuration types for the pay engine.
//!
//! Settings are persisted as strings under fixed keys; [`RateConfig`] is the
//! typed, immutable view the calculator consumes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

use super::store::SettingsStore;

/// The named settings kept in the settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    /// Base hourly pay.
    HourlyRate,
    /// Hour of day (0-23) at which the night window opens.
    NightStartHour,
    /// Bonus percentage for night minutes inside a scheduled shift.
    NightInShiftBonus,
    /// Bonus percentage for minutes on a public holiday.
    HolidayBonus,
    /// Bonus percentage for Sunday minutes inside a scheduled shift.
    SundayInShiftBonus,
    /// Bonus percentage for daytime overtime minutes.
    DayOvertimeBonus,
    /// Bonus percentage for night-time overtime minutes.
    NightOvertimeBonus,
}

impl SettingKey {
    /// Every setting key, in display order.
    pub const ALL: [SettingKey; 7] = [
        SettingKey::HourlyRate,
        SettingKey::NightStartHour,
        SettingKey::NightInShiftBonus,
        SettingKey::HolidayBonus,
        SettingKey::SundayInShiftBonus,
        SettingKey::DayOvertimeBonus,
        SettingKey::NightOvertimeBonus,
    ];

    /// The storage key for this setting.
    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::HourlyRate => "hourly_rate",
            SettingKey::NightStartHour => "night_start_hour",
            SettingKey::NightInShiftBonus => "night_in_shift_bonus",
            SettingKey::HolidayBonus => "holiday_bonus",
            SettingKey::SundayInShiftBonus => "sunday_in_shift_bonus",
            SettingKey::DayOvertimeBonus => "day_overtime_bonus",
            SettingKey::NightOvertimeBonus => "night_overtime_bonus",
        }
    }

    /// The value written by store initialization when no override exists.
    pub fn default_value(self) -> &'static str {
        match self {
            SettingKey::HourlyRate => "7.80",
            SettingKey::NightStartHour => "22",
            SettingKey::NightInShiftBonus => "20.0",
            SettingKey::HolidayBonus => "30.0",
            SettingKey::SundayInShiftBonus => "10.0",
            SettingKey::DayOvertimeBonus => "25.0",
            SettingKey::NightOvertimeBonus => "50.0",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The rate configuration used by the pay calculator.
///
/// Bonuses are whole percentages (`20.0` means +20%) and are applied as
/// additive fractions on top of a base multiplier of `1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfig {
    /// Base hourly pay.
    pub hourly_rate: Decimal,
    /// Hour (0-23) at which the night window opens. The window always closes at 06:00.
    pub night_start_hour: u32,
    /// Night bonus for scheduled minutes.
    pub night_in_shift_bonus: Decimal,
    /// Public holiday bonus, stacked on everything else.
    pub holiday_bonus: Decimal,
    /// Sunday bonus, scheduled minutes only.
    pub sunday_in_shift_bonus: Decimal,
    /// Overtime bonus outside the night window.
    pub day_overtime_bonus: Decimal,
    /// Overtime bonus inside the night window.
    pub night_overtime_bonus: Decimal,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            hourly_rate: Decimal::new(780, 2),
            night_start_hour: 22,
            night_in_shift_bonus: Decimal::new(200, 1),
            holiday_bonus: Decimal::new(300, 1),
            sunday_in_shift_bonus: Decimal::new(100, 1),
            day_overtime_bonus: Decimal::new(250, 1),
            night_overtime_bonus: Decimal::new(500, 1),
        }
    }
}

impl RateConfig {
    /// Loads every setting from the store.
    ///
    /// Absent keys are an integrity error: defaults belong to store
    /// initialization, so nothing is filled in here.
    pub fn from_store<S: SettingsStore + ?Sized>(store: &S) -> EngineResult<Self> {
        let config = Self {
            hourly_rate: read_decimal(store, SettingKey::HourlyRate)?,
            night_start_hour: read_hour(store, SettingKey::NightStartHour)?,
            night_in_shift_bonus: read_decimal(store, SettingKey::NightInShiftBonus)?,
            holiday_bonus: read_decimal(store, SettingKey::HolidayBonus)?,
            sunday_in_shift_bonus: read_decimal(store, SettingKey::SundayInShiftBonus)?,
            day_overtime_bonus: read_decimal(store, SettingKey::DayOvertimeBonus)?,
            night_overtime_bonus: read_decimal(store, SettingKey::NightOvertimeBonus)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the value ranges: no negative amounts, night hour within a day.
    pub fn validate(&self) -> EngineResult<()> {
        if self.night_start_hour > 23 {
            return Err(EngineError::InvalidSetting {
                key: SettingKey::NightStartHour.to_string(),
                value: self.night_start_hour.to_string(),
                message: "hour must be between 0 and 23".to_string(),
            });
        }

        for (key, value) in self.decimal_entries() {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(EngineError::InvalidSetting {
                    key: key.to_string(),
                    value: value.to_string(),
                    message: "value must not be negative".to_string(),
                });
            }
        }

        Ok(())
    }

    /// The string form of every setting, as written to the store.
    pub fn entries(&self) -> Vec<(SettingKey, String)> {
        let mut entries = vec![(SettingKey::NightStartHour, self.night_start_hour.to_string())];
        entries.extend(
            self.decimal_entries()
                .into_iter()
                .map(|(key, value)| (key, value.to_string())),
        );
        entries
    }

    /// Base pay for one minute of work.
    pub fn base_per_minute(&self) -> Decimal {
        self.hourly_rate / Decimal::from(60)
    }

    fn decimal_entries(&self) -> [(SettingKey, Decimal); 6] {
        [
            (SettingKey::HourlyRate, self.hourly_rate),
            (SettingKey::NightInShiftBonus, self.night_in_shift_bonus),
            (SettingKey::HolidayBonus, self.holiday_bonus),
            (SettingKey::SundayInShiftBonus, self.sunday_in_shift_bonus),
            (SettingKey::DayOvertimeBonus, self.day_overtime_bonus),
            (SettingKey::NightOvertimeBonus, self.night_overtime_bonus),
        ]
    }
}

/// Partial settings update, as accepted from YAML files and the HTTP API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateOverrides {
    /// New base hourly pay.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// New night window start hour.
    #[serde(default)]
    pub night_start_hour: Option<u32>,
    /// New night-in-shift bonus percentage.
    #[serde(default)]
    pub night_in_shift_bonus: Option<Decimal>,
    /// New holiday bonus percentage.
    #[serde(default)]
    pub holiday_bonus: Option<Decimal>,
    /// New Sunday-in-shift bonus percentage.
    #[serde(default)]
    pub sunday_in_shift_bonus: Option<Decimal>,
    /// New daytime overtime bonus percentage.
    #[serde(default)]
    pub day_overtime_bonus: Option<Decimal>,
    /// New night-time overtime bonus percentage.
    #[serde(default)]
    pub night_overtime_bonus: Option<Decimal>,
}

impl RateOverrides {
    /// Returns `base` with every present override applied.
    pub fn apply_to(&self, base: &RateConfig) -> RateConfig {
        RateConfig {
            hourly_rate: self.hourly_rate.unwrap_or(base.hourly_rate),
            night_start_hour: self.night_start_hour.unwrap_or(base.night_start_hour),
            night_in_shift_bonus: self.night_in_shift_bonus.unwrap_or(base.night_in_shift_bonus),
            holiday_bonus: self.holiday_bonus.unwrap_or(base.holiday_bonus),
            sunday_in_shift_bonus: self
                .sunday_in_shift_bonus
                .unwrap_or(base.sunday_in_shift_bonus),
            day_overtime_bonus: self.day_overtime_bonus.unwrap_or(base.day_overtime_bonus),
            night_overtime_bonus: self.night_overtime_bonus.unwrap_or(base.night_overtime_bonus),
        }
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn read_raw<S: SettingsStore + ?Sized>(store: &S, key: SettingKey) -> EngineResult<String> {
    store.get(key).ok_or_else(|| EngineError::MissingSetting {
        key: key.to_string(),
    })
}

fn read_decimal<S: SettingsStore + ?Sized>(store: &S, key: SettingKey) -> EngineResult<Decimal> {
    let raw = read_raw(store, key)?;
    Decimal::from_str(raw.trim()).map_err(|e| EngineError::InvalidSetting {
        key: key.to_string(),
        value: raw.clone(),
        message: e.to_string(),
    })
}

fn read_hour<S: SettingsStore + ?Sized>(store: &S, key: SettingKey) -> EngineResult<u32> {
    let raw = read_raw(store, key)?;
    raw.trim()
        .parse::<u32>()
        .map_err(|e| EngineError::InvalidSetting {
            key: key.to_string(),
            value: raw.clone(),
            message: e.to_string(),
        })
}
