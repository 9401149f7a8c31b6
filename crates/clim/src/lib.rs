//! # boreas-clim
//!
//! Monthly climatology computation: group a gridded time series by
//! calendar month and average, and combine per-year climatologies into a
//! reference-period mean. Works on boreas's flat `&[f64]` + cell-count
//! representation; month labels come from `boreas-calendar`.

mod error;
mod monthly;

pub use error::ClimError;
pub use monthly::{MonthlyClimatology, average_years, monthly_mean};
