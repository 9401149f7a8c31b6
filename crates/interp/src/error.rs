//! Error types for boreas-interp.

/// Error type for all fallible operations in the boreas-interp crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InterpError {
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

    /// Returned when knot times are not strictly increasing.
    #[error("knot times are not strictly increasing at index {index}")]
    NonMonotonicTimes {
        /// Index of the first offending knot.
        index: usize,
    },

    /// Returned when a sample target lies outside the knot range.
    #[error("target {target} outside knot range [{lo}, {hi}]")]
    TargetOutOfRange {
        /// The requested sample time.
        target: f64,
        /// First knot time.
        lo: f64,
        /// Last knot time.
        hi: f64,
    },
}
