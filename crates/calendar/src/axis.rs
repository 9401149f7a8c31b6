//! Mid-month and 3-hourly time axes, expressed in hours since January 1
//! 00:00 of the file's year.

use crate::steps::STEPS_PER_YEAR;
use crate::year::DAYS_PER_MONTH;

/// Hours between consecutive 3-hour steps.
pub const HOURS_PER_STEP: f64 = 3.0;

/// Hours in a common (365-day) year. This is also the cyclic padding shift
/// applied when wrapping a monthly climatology across the year boundary.
pub const HOURS_PER_YEAR: f64 = 365.0 * 24.0;

/// Returns the time offsets in hours of the monthly climatology frames:
/// the 15th day, 00:00, of each month of a common year.
pub fn mid_month_offsets() -> [f64; 12] {
    let mut offsets = [0.0; 12];
    let mut days_before = 0u32;
    for month in 1..=12usize {
        offsets[month - 1] = f64::from(days_before + 14) * 24.0;
        days_before += u32::from(DAYS_PER_MONTH[month]);
    }
    offsets
}

/// Returns the 2920 offsets in hours of the 3-hour steps of a common year:
/// 0.0, 3.0, ..., 8757.0.
pub fn three_hourly_offsets() -> Vec<f64> {
    (0..STEPS_PER_YEAR)
        .map(|i| i as f64 * HOURS_PER_STEP)
        .collect()
}
