//! Group-by-month averaging.

use tracing::debug;

use crate::error::ClimError;

/// Twelve monthly mean frames on a fixed spatial grid.
///
/// Frames are stored flat in calendar order: `values[(m - 1) * cells..]`
/// holds the mean for month `m`.
#[derive(Debug, Clone)]
pub struct MonthlyClimatology {
    values: Vec<f64>,
    cells: usize,
}

impl MonthlyClimatology {
    /// Wraps a precomputed `12 * cells` value block.
    ///
    /// # Errors
    ///
    /// Returns [`ClimError::LengthMismatch`] if `values.len()` is not
    /// `12 * cells`, or [`ClimError::EmptyData`] if `cells` is zero.
    pub fn new(values: Vec<f64>, cells: usize) -> Result<Self, ClimError> {
        if cells == 0 {
            return Err(ClimError::EmptyData);
        }
        if values.len() != 12 * cells {
            return Err(ClimError::LengthMismatch {
                expected: 12 * cells,
                got: values.len(),
                field: "values".to_string(),
            });
        }
        Ok(Self { values, cells })
    }

    /// Number of grid cells per frame.
    pub fn cells(&self) -> usize {
        self.cells
    }

    /// The full `12 * cells` value block in calendar order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The mean frame for `month` (1..=12) as a flat `cells` slice.
    ///
    /// # Errors
    ///
    /// Returns [`ClimError::InvalidMonth`] if `month` is outside 1..=12.
    pub fn frame(&self, month: u8) -> Result<&[f64], ClimError> {
        if !(1..=12).contains(&month) {
            return Err(ClimError::InvalidMonth { month });
        }
        let start = (month as usize - 1) * self.cells;
        Ok(&self.values[start..start + self.cells])
    }

    /// Consumes the climatology, returning the flat value block.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// Averages a gridded series frame-by-frame into twelve monthly means.
///
/// `data` holds `months.len()` frames of `cells` values each, row-major.
/// For every month, all frames carrying that label are averaged
/// elementwise. NaN samples are skipped per cell; a cell with no finite
/// sample in a month comes out as NaN.
///
/// # Errors
///
/// Returns [`ClimError::EmptyData`] on empty input,
/// [`ClimError::LengthMismatch`] if `data.len() != months.len() * cells`,
/// [`ClimError::InvalidMonth`] on a label outside 1..=12, and
/// [`ClimError::MissingMonth`] if some month has no frames at all.
pub fn monthly_mean(
    data: &[f64],
    months: &[u8],
    cells: usize,
) -> Result<MonthlyClimatology, ClimError> {
    if data.is_empty() || months.is_empty() || cells == 0 {
        return Err(ClimError::EmptyData);
    }
    if data.len() != months.len() * cells {
        return Err(ClimError::LengthMismatch {
            expected: months.len() * cells,
            got: data.len(),
            field: "data".to_string(),
        });
    }
    for &m in months {
        if !(1..=12).contains(&m) {
            return Err(ClimError::InvalidMonth { month: m });
        }
    }
    for month in 1..=12u8 {
        if !months.contains(&month) {
            return Err(ClimError::MissingMonth { month });
        }
    }

    let mut sums = vec![0.0f64; 12 * cells];
    let mut counts = vec![0u32; 12 * cells];

    for (t, &month) in months.iter().enumerate() {
        let frame = &data[t * cells..(t + 1) * cells];
        let offset = (month as usize - 1) * cells;
        for (c, &v) in frame.iter().enumerate() {
            if v.is_nan() {
                continue;
            }
            sums[offset + c] += v;
            counts[offset + c] += 1;
        }
    }

    let values: Vec<f64> = sums
        .iter()
        .zip(counts.iter())
        .map(|(&s, &n)| if n == 0 { f64::NAN } else { s / f64::from(n) })
        .collect();

    debug!(n_frames = months.len(), cells, "computed monthly means");
    MonthlyClimatology::new(values, cells)
}

/// Averages per-year climatologies into a reference-period climatology.
///
/// All inputs must share the same cell count. The mean is taken per month
/// and per cell with equal weights; NaN entries are skipped, and a slot
/// that is NaN in every year stays NaN.
///
/// # Errors
///
/// Returns [`ClimError::EmptyData`] if `years` is empty and
/// [`ClimError::LengthMismatch`] if the cell counts disagree.
pub fn average_years(years: &[MonthlyClimatology]) -> Result<MonthlyClimatology, ClimError> {
    let first = years.first().ok_or(ClimError::EmptyData)?;
    let cells = first.cells();
    for (i, y) in years.iter().enumerate() {
        if y.cells() != cells {
            return Err(ClimError::LengthMismatch {
                expected: cells,
                got: y.cells(),
                field: format!("climatology {i} cells"),
            });
        }
    }

    let n = 12 * cells;
    let mut sums = vec![0.0f64; n];
    let mut counts = vec![0u32; n];
    for y in years {
        for (i, &v) in y.values().iter().enumerate() {
            if v.is_nan() {
                continue;
            }
            sums[i] += v;
            counts[i] += 1;
        }
    }

    let values: Vec<f64> = sums
        .iter()
        .zip(counts.iter())
        .map(|(&s, &n)| if n == 0 { f64::NAN } else { s / f64::from(n) })
        .collect();

    MonthlyClimatology::new(values, cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Two frames per month, one cell, values m and m + 1.
    fn two_frames_per_month() -> (Vec<f64>, Vec<u8>) {
        let mut data = Vec::new();
        let mut months = Vec::new();
        for m in 1..=12u8 {
            data.push(f64::from(m));
            data.push(f64::from(m) + 1.0);
            months.push(m);
            months.push(m);
        }
        (data, months)
    }

    #[test]
    fn mean_of_two_frames() {
        let (data, months) = two_frames_per_month();
        let clim = monthly_mean(&data, &months, 1).unwrap();
        for m in 1..=12u8 {
            assert_relative_eq!(clim.frame(m).unwrap()[0], f64::from(m) + 0.5);
        }
    }

    #[test]
    fn nan_skipped_per_cell() {
        // Month 1 only: three frames, middle one NaN.
        let mut data = vec![1.0, f64::NAN, 3.0];
        let mut months = vec![1u8, 1, 1];
        // Pad the remaining months with single frames so every month exists.
        for m in 2..=12u8 {
            data.push(f64::from(m));
            months.push(m);
        }

        let clim = monthly_mean(&data, &months, 1).unwrap();
        assert_relative_eq!(clim.frame(1).unwrap()[0], 2.0);
    }

    #[test]
    fn all_nan_cell_stays_nan() {
        let mut data = vec![f64::NAN, f64::NAN];
        let mut months = vec![1u8, 1];
        for m in 2..=12u8 {
            data.push(0.0);
            months.push(m);
        }

        let clim = monthly_mean(&data, &months, 1).unwrap();
        assert!(clim.frame(1).unwrap()[0].is_nan());
        assert!(!clim.frame(2).unwrap()[0].is_nan());
    }

    #[test]
    fn multi_cell_grouping() {
        // Two cells, one frame per month; cell 1 carries 10 * month.
        let mut data = Vec::new();
        let mut months = Vec::new();
        for m in 1..=12u8 {
            data.push(f64::from(m));
            data.push(f64::from(m) * 10.0);
            months.push(m);
        }

        let clim = monthly_mean(&data, &months, 2).unwrap();
        let july = clim.frame(7).unwrap();
        assert_relative_eq!(july[0], 7.0);
        assert_relative_eq!(july[1], 70.0);
    }

    #[test]
    fn empty_input_rejected() {
        assert!(matches!(
            monthly_mean(&[], &[], 1),
            Err(ClimError::EmptyData)
        ));
    }

    #[test]
    fn length_mismatch_rejected() {
        let err = monthly_mean(&[1.0, 2.0, 3.0], &[1, 2], 2).unwrap_err();
        assert!(matches!(err, ClimError::LengthMismatch { .. }));
    }

    #[test]
    fn invalid_month_rejected() {
        let err = monthly_mean(&[1.0], &[13], 1).unwrap_err();
        assert!(matches!(err, ClimError::InvalidMonth { month: 13 }));
    }

    #[test]
    fn missing_month_rejected() {
        // Only January present.
        let err = monthly_mean(&[1.0, 2.0], &[1, 1], 1).unwrap_err();
        assert!(matches!(err, ClimError::MissingMonth { month: 2 }));
    }

    #[test]
    fn average_years_equal_weights() {
        let a = MonthlyClimatology::new(vec![1.0; 12], 1).unwrap();
        let b = MonthlyClimatology::new(vec![3.0; 12], 1).unwrap();
        let avg = average_years(&[a, b]).unwrap();
        for m in 1..=12u8 {
            assert_relative_eq!(avg.frame(m).unwrap()[0], 2.0);
        }
    }

    #[test]
    fn average_years_skips_nan() {
        let mut v = vec![4.0; 12];
        v[0] = f64::NAN;
        let a = MonthlyClimatology::new(v, 1).unwrap();
        let b = MonthlyClimatology::new(vec![2.0; 12], 1).unwrap();
        let avg = average_years(&[a, b]).unwrap();
        // January has one finite sample, the rest have two.
        assert_relative_eq!(avg.frame(1).unwrap()[0], 2.0);
        assert_relative_eq!(avg.frame(2).unwrap()[0], 3.0);
    }

    #[test]
    fn average_years_cell_mismatch() {
        let a = MonthlyClimatology::new(vec![0.0; 12], 1).unwrap();
        let b = MonthlyClimatology::new(vec![0.0; 24], 2).unwrap();
        assert!(matches!(
            average_years(&[a, b]),
            Err(ClimError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn average_years_empty() {
        assert!(matches!(average_years(&[]), Err(ClimError::EmptyData)));
    }

    #[test]
    fn frame_invalid_month() {
        let clim = MonthlyClimatology::new(vec![0.0; 12], 1).unwrap();
        assert!(matches!(
            clim.frame(0),
            Err(ClimError::InvalidMonth { month: 0 })
        ));
    }
}
