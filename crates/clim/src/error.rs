//! Error types for boreas-clim.

/// Error type for all fallible operations in the boreas-clim crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClimError {
    /// Returned when input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when array lengths do not match.
    #[error("length mismatch: expected {expected}, got {got} for {field}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
        /// Name of the mismatched field.
        field: String,
    },

    /// Returned when a month label is outside 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month value.
        month: u8,
    },

    /// Returned when a series has no frames labelled with some month.
    #[error("no frames labelled with month {month}")]
    MissingMonth {
        /// The month with zero frames.
        month: u8,
    },
}
