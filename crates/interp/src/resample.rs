//! Grid-wide resampling loop and leap-year extension.

use rayon::prelude::*;
use tracing::debug;

use boreas_calendar::{HOURS_PER_STEP, LEAP_EXTRA_STEPS, STEPS_PER_YEAR, three_hourly_offsets};

use crate::error::InterpError;
use crate::quadratic::{lagrange_weights, stencil_start};
use crate::series::{PaddedSeries, ThreeHourlySeries};

/// Resamples a padded monthly series onto the 2920-step 3-hourly axis of
/// a common year.
///
/// The stencil and Lagrange weights for each target time depend only on
/// the knot times, so they are planned once and applied to every grid
/// cell; the per-frame fill is parallelised over time steps.
///
/// # Errors
///
/// Returns [`InterpError::TargetOutOfRange`] if a target falls outside
/// the padded knot range (cannot happen for the standard mid-month knots,
/// which bracket the year by three months on each side).
#[tracing::instrument(skip(padded), fields(cells = padded.cells()))]
pub fn resample_to_3h(padded: &PaddedSeries) -> Result<ThreeHourlySeries, InterpError> {
    let targets = three_hourly_offsets();
    let knots = padded.times();

    // Plan stencils and weights per target, shared across the grid.
    let plans: Vec<(usize, [f64; 3])> = targets
        .iter()
        .map(|&t| {
            let s = stencil_start(knots, t)?;
            Ok((s, lagrange_weights(knots[s], knots[s + 1], knots[s + 2], t)))
        })
        .collect::<Result<_, InterpError>>()?;

    let cells = padded.cells();
    let mut values = vec![0.0f64; targets.len() * cells];
    values
        .par_chunks_mut(cells)
        .zip(plans.par_iter())
        .for_each(|(frame, &(s, w))| {
            let f0 = padded.frame(s);
            let f1 = padded.frame(s + 1);
            let f2 = padded.frame(s + 2);
            for c in 0..cells {
                frame[c] = w[0] * f0[c] + w[1] * f1[c] + w[2] * f2[c];
            }
        });

    debug!(n_steps = targets.len(), "resampled monthly series to 3-hourly");
    Ok(ThreeHourlySeries {
        values,
        times: targets,
        cells,
    })
}

/// Extends a 2920-step 3-hourly series into a 2928-step leap-year series
/// by repeating the final frame eight times, each at a further 3-hour
/// offset.
///
/// Operates on a raw frame block and its time axis so callers holding
/// file-level data can extend in place.
///
/// # Errors
///
/// Returns [`InterpError::LengthMismatch`] if the series is not exactly
/// one common year long, and [`InterpError::EmptyData`] if `cells` is
/// zero.
pub fn extend_leap(
    values: &mut Vec<f64>,
    times: &mut Vec<f64>,
    cells: usize,
) -> Result<(), InterpError> {
    if cells == 0 {
        return Err(InterpError::EmptyData);
    }
    if times.len() != STEPS_PER_YEAR {
        return Err(InterpError::LengthMismatch {
            expected: STEPS_PER_YEAR,
            got: times.len(),
            field: "times".to_string(),
        });
    }
    if values.len() != STEPS_PER_YEAR * cells {
        return Err(InterpError::LengthMismatch {
            expected: STEPS_PER_YEAR * cells,
            got: values.len(),
            field: "values".to_string(),
        });
    }

    let last_frame = values[(STEPS_PER_YEAR - 1) * cells..].to_vec();
    let last_time = times[STEPS_PER_YEAR - 1];
    for k in 1..=LEAP_EXTRA_STEPS {
        values.extend_from_slice(&last_frame);
        times.push(last_time + HOURS_PER_STEP * k as f64);
    }
    Ok(())
}
