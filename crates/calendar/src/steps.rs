//! 3-hour step accounting and step-to-month mapping.

use crate::error::CalendarError;
use crate::year::{days_in_month, days_in_year, is_leap_year};

/// Number of 3-hour steps per day.
pub const STEPS_PER_DAY: usize = 8;

/// Number of 3-hour steps in a common (365-day) year.
pub const STEPS_PER_YEAR: usize = 365 * STEPS_PER_DAY;

/// Number of extra 3-hour steps a leap year carries (one day).
pub const LEAP_EXTRA_STEPS: usize = STEPS_PER_DAY;

/// Returns the number of 3-hour steps in `year` (2920 or 2928).
pub fn steps_per_year(year: i32) -> usize {
    days_in_year(year) as usize * STEPS_PER_DAY
}

/// Returns the number of 3-hour steps in `month`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
pub fn steps_in_month(month: u8, leap: bool) -> Result<usize, CalendarError> {
    Ok(days_in_month(month, leap)? as usize * STEPS_PER_DAY)
}

/// Returns the calendar month (1..=12) containing the 0-based 3-hour step
/// `step` within a year.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidStep`] if `step` is past the end of the
/// year.
pub fn month_of_step(step: usize, leap: bool) -> Result<u8, CalendarError> {
    let max = if leap {
        STEPS_PER_YEAR + LEAP_EXTRA_STEPS
    } else {
        STEPS_PER_YEAR
    };
    if step >= max {
        return Err(CalendarError::InvalidStep { step, max });
    }

    let mut remaining = step;
    for month in 1..=12u8 {
        let n = steps_in_month(month, leap).expect("month in 1..=12");
        if remaining < n {
            return Ok(month);
        }
        remaining -= n;
    }
    unreachable!("step < max implies a containing month");
}

/// Returns the month label (1..=12) of every 3-hour step in `year`, in
/// order. The result has [`steps_per_year`]`(year)` entries.
pub fn step_months(year: i32) -> Vec<u8> {
    let leap = is_leap_year(year);
    let mut months = Vec::with_capacity(steps_per_year(year));
    for month in 1..=12u8 {
        let n = steps_in_month(month, leap).expect("month in 1..=12");
        months.extend(std::iter::repeat_n(month, n));
    }
    months
}
