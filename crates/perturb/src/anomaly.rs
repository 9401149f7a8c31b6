//! Elementwise anomaly application.

use crate::error::PerturbError;

/// Adds an anomaly series onto a base series elementwise.
///
/// Lengths must match exactly; the caller is responsible for extending a
/// common-year anomaly to leap length first. NaN in either operand
/// propagates, so masked points stay masked.
///
/// # Errors
///
/// Returns [`PerturbError::EmptyData`] on empty input and
/// [`PerturbError::LengthMismatch`] if the lengths differ.
pub fn add_anomaly(base: &[f64], anomaly: &[f64]) -> Result<Vec<f64>, PerturbError> {
    if base.is_empty() {
        return Err(PerturbError::EmptyData);
    }
    if anomaly.len() != base.len() {
        return Err(PerturbError::LengthMismatch {
            expected: base.len(),
            got: anomaly.len(),
            field: "anomaly".to_string(),
        });
    }
    Ok(base
        .iter()
        .zip(anomaly.iter())
        .map(|(&b, &a)| b + a)
        .collect())
}

/// Derives a snowfall anomaly from a precipitation anomaly and the
/// 3-hourly snow/precipitation ratio, elementwise over the shared time
/// axis.
///
/// # Errors
///
/// Returns [`PerturbError::EmptyData`] on empty input and
/// [`PerturbError::LengthMismatch`] if the lengths differ.
pub fn synthesize_snow(precip_anomaly: &[f64], ratio: &[f64]) -> Result<Vec<f64>, PerturbError> {
    if precip_anomaly.is_empty() {
        return Err(PerturbError::EmptyData);
    }
    if ratio.len() != precip_anomaly.len() {
        return Err(PerturbError::LengthMismatch {
            expected: precip_anomaly.len(),
            got: ratio.len(),
            field: "ratio".to_string(),
        });
    }
    Ok(precip_anomaly
        .iter()
        .zip(ratio.iter())
        .map(|(&a, &r)| a * r)
        .collect())
}

/// Replaces every non-finite value with `0.0` in place.
///
/// Applied to derived anomaly products before writing so that NaN and Inf
/// never reach downstream forcing files.
pub fn sanitize(values: &mut [f64]) {
    for v in values.iter_mut() {
        if !v.is_finite() {
            *v = 0.0;
        }
    }
}
