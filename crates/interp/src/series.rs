//! Series containers and cyclic padding.

use boreas_calendar::HOURS_PER_YEAR;

use crate::error::InterpError;

/// Number of monthly knots carried on each side of the year by
/// [`pad_cyclic`]. Three knots guarantee a full quadratic stencil at the
/// year boundaries.
pub(crate) const PAD_MONTHS: usize = 3;

/// A 12-frame monthly gridded series with its knot times in hours since
/// January 1 00:00 of the nominal year.
#[derive(Debug, Clone)]
pub struct MonthlySeries {
    values: Vec<f64>,
    times: [f64; 12],
    cells: usize,
}

impl MonthlySeries {
    /// Creates a monthly series from a flat `12 * cells` value block.
    ///
    /// # Errors
    ///
    /// Returns [`InterpError::EmptyData`] if `cells` is zero,
    /// [`InterpError::LengthMismatch`] if `values.len() != 12 * cells`,
    /// and [`InterpError::NonMonotonicTimes`] if the knot times are not
    /// strictly increasing within `[0, 8760)` hours.
    pub fn new(values: Vec<f64>, times: [f64; 12], cells: usize) -> Result<Self, InterpError> {
        if cells == 0 {
            return Err(InterpError::EmptyData);
        }
        if values.len() != 12 * cells {
            return Err(InterpError::LengthMismatch {
                expected: 12 * cells,
                got: values.len(),
                field: "values".to_string(),
            });
        }
        if times[0] < 0.0 || times[11] >= HOURS_PER_YEAR {
            return Err(InterpError::NonMonotonicTimes { index: 0 });
        }
        for i in 1..12 {
            if times[i] <= times[i - 1] {
                return Err(InterpError::NonMonotonicTimes { index: i });
            }
        }
        Ok(Self {
            values,
            times,
            cells,
        })
    }

    /// Number of grid cells per frame.
    pub fn cells(&self) -> usize {
        self.cells
    }

    /// The frame for 0-based month index `m` as a flat `cells` slice.
    pub(crate) fn frame(&self, m: usize) -> &[f64] {
        &self.values[m * self.cells..(m + 1) * self.cells]
    }

    /// The 12 knot times.
    pub fn times(&self) -> &[f64; 12] {
        &self.times
    }
}

/// An 18-knot series: a [`MonthlySeries`] padded cyclically across the
/// year boundaries.
#[derive(Debug, Clone)]
pub struct PaddedSeries {
    pub(crate) values: Vec<f64>,
    pub(crate) times: [f64; 12 + 2 * PAD_MONTHS],
    pub(crate) cells: usize,
}

impl PaddedSeries {
    /// The 18 knot times.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of grid cells per frame.
    pub fn cells(&self) -> usize {
        self.cells
    }

    /// The frame for 0-based knot index `k` as a flat `cells` slice.
    pub(crate) fn frame(&self, k: usize) -> &[f64] {
        &self.values[k * self.cells..(k + 1) * self.cells]
    }
}

/// Pads a monthly series cyclically: months October..December are
/// prepended shifted back by 365 days and January..March are appended
/// shifted forward by 365 days, treating the year as periodic.
pub fn pad_cyclic(monthly: &MonthlySeries) -> PaddedSeries {
    let cells = monthly.cells();
    let mut values = Vec::with_capacity((12 + 2 * PAD_MONTHS) * cells);
    let mut times = [0.0; 12 + 2 * PAD_MONTHS];

    for (k, m) in (12 - PAD_MONTHS..12).enumerate() {
        values.extend_from_slice(monthly.frame(m));
        times[k] = monthly.times()[m] - HOURS_PER_YEAR;
    }
    for m in 0..12 {
        values.extend_from_slice(monthly.frame(m));
        times[PAD_MONTHS + m] = monthly.times()[m];
    }
    for (k, m) in (0..PAD_MONTHS).enumerate() {
        values.extend_from_slice(monthly.frame(m));
        times[PAD_MONTHS + 12 + k] = monthly.times()[m] + HOURS_PER_YEAR;
    }

    PaddedSeries {
        values,
        times,
        cells,
    }
}

/// A gridded 3-hourly series: one frame per 3-hour step with its time
/// offsets in hours.
#[derive(Debug, Clone)]
pub struct ThreeHourlySeries {
    /// Flat data, row-major over `[n_steps, cells]`.
    pub values: Vec<f64>,
    /// Time offsets in hours, one per step.
    pub times: Vec<f64>,
    /// Number of grid cells per frame.
    pub cells: usize,
}

impl ThreeHourlySeries {
    /// Number of 3-hour steps.
    pub fn n_steps(&self) -> usize {
        self.times.len()
    }
}
