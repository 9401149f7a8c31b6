//! # boreas-calendar
//!
//! Pure date and 3-hourly time-step arithmetic for the forcing calendar.
//!
//! Reanalysis forcing files hold one calendar year of 3-hour frames: 2920
//! for a common year, 2928 for a leap year. Monthly climatologies are
//! pinned to the 15th of each month at 00:00. Everything here works in
//! plain step counts and fractional-hour offsets from January 1 00:00 of
//! the file's year; no time zone or epoch handling is involved.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `year` | Leap rule and month/year lengths |
//! | `steps` | 3-hour step accounting and step-to-month mapping |
//! | `axis` | Mid-month and 3-hourly time axes in hours |
//! | `error` | Error types |

mod axis;
mod error;
mod steps;
mod year;

pub use axis::{HOURS_PER_STEP, HOURS_PER_YEAR, mid_month_offsets, three_hourly_offsets};
pub use error::CalendarError;
pub use steps::{
    LEAP_EXTRA_STEPS, STEPS_PER_DAY, STEPS_PER_YEAR, month_of_step, step_months, steps_in_month,
    steps_per_year,
};
pub use year::{days_in_month, days_in_year, is_leap_year};
