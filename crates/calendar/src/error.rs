//! Error types for boreas-calendar.

/// Error type for all fallible operations in the boreas-calendar crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month value is outside 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month value.
        month: u8,
    },

    /// Returned when a 3-hour step index is out of range for the year.
    #[error("invalid step index: {step} (year has {max} steps)")]
    InvalidStep {
        /// The offending 0-based step index.
        step: usize,
        /// Number of steps in the year.
        max: usize,
    },
}
