//! Error types for boreas-perturb.

/// Error type for all fallible operations in the boreas-perturb crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PerturbError {
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
}
