//! Night window detection.
//!
//! The night window always closes at 06:00 and opens at a configurable hour.

/// Hour at which the night window closes.
pub const NIGHT_END_HOUR: u32 = 6;

/// Returns true if `hour` lies inside the night window opening at
/// `night_start_hour`.
///
/// - `night_start_hour < 6`: the window is `[night_start_hour, 6)`.
/// - `night_start_hour >= 6`: the window wraps midnight, `[night_start_hour, 24) ∪ [0, 6)`.
///
/// A small start hour such as `3` therefore leaves `00:00-03:00` outside
/// the window.
///
/// # Example
///
/// ```
/// use work_tracker::calculation::is_night_hour;
///
/// assert!(is_night_hour(22, 23));
/// assert!(is_night_hour(22, 5));
/// assert!(!is_night_hour(22, 6));
/// assert!(!is_night_hour(3, 1));
/// ```
pub fn is_night_hour(night_start_hour: u32, hour: u32) -> bool {
    if night_start_hour < NIGHT_END_HOUR {
        night_start_hour <= hour && hour < NIGHT_END_HOUR
    } else {
        hour >= night_start_hour || hour < NIGHT_END_HOUR
    }
}
