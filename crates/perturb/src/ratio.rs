//! Guarded snow/precipitation ratio.

use crate::error::PerturbError;

/// Computes the per-element snowfall fraction of total precipitation.
///
/// For each element: where `precip > 0` the ratio is `snow / precip`,
/// everywhere else (zero, negative, or non-finite precipitation) it is
/// `0.0`. Any non-finite quotient is also forced to `0.0`, so the output
/// contains only finite values and can be multiplied into downstream
/// products without spreading NaN or Inf.
///
/// # Errors
///
/// Returns [`PerturbError::EmptyData`] if the inputs are empty and
/// [`PerturbError::LengthMismatch`] if they differ in length.
pub fn snow_precip_ratio(snow: &[f64], precip: &[f64]) -> Result<Vec<f64>, PerturbError> {
    if snow.is_empty() {
        return Err(PerturbError::EmptyData);
    }
    if precip.len() != snow.len() {
        return Err(PerturbError::LengthMismatch {
            expected: snow.len(),
            got: precip.len(),
            field: "precip".to_string(),
        });
    }

    Ok(snow
        .iter()
        .zip(precip.iter())
        .map(|(&s, &p)| {
            if p > 0.0 {
                let r = s / p;
                if r.is_finite() { r } else { 0.0 }
            } else {
                0.0
            }
        })
        .collect())
}
