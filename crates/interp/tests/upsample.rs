//! End-to-end upsampling checks: pad -> resample -> leap extension.

use approx::assert_relative_eq;

use boreas_calendar::{mid_month_offsets, month_of_step, step_months};
use boreas_interp::{MonthlySeries, extend_leap, pad_cyclic, resample_to_3h};

#[test]
fn full_year_from_monthly_means() {
    // A smooth seasonal cycle on a 2x2 grid with a per-cell offset.
    let cells = 4;
    let mut values = Vec::with_capacity(12 * cells);
    for m in 0..12u32 {
        let seasonal = (f64::from(m) / 12.0 * std::f64::consts::TAU).cos();
        for c in 0..cells {
            values.push(seasonal + c as f64);
        }
    }
    let monthly = MonthlySeries::new(values, mid_month_offsets(), cells).unwrap();
    let series = resample_to_3h(&pad_cyclic(&monthly)).unwrap();

    assert_eq!(series.n_steps(), 2920);
    assert_eq!(series.values.len(), 2920 * cells);

    // Interpolated values stay within the envelope of the monthly input
    // plus a small overshoot margin for the quadratic stencil.
    for step in 0..series.n_steps() {
        for c in 0..cells {
            let v = series.values[step * cells + c];
            assert!(v.is_finite());
            assert!(
                v > c as f64 - 1.2 && v < c as f64 + 1.2,
                "step {step} cell {c}: {v} outside envelope"
            );
        }
    }
}

#[test]
fn interpolated_series_tracks_month_ordering() {
    // Monthly values equal to the month number: each 3-hourly sample near
    // a month's midpoint must sit close to that month's value.
    let values: Vec<f64> = (1..=12).map(f64::from).collect();
    let monthly = MonthlySeries::new(values, mid_month_offsets(), 1).unwrap();
    let series = resample_to_3h(&pad_cyclic(&monthly)).unwrap();

    let labels = step_months(1951);
    for (step, &v) in series.values.iter().enumerate() {
        let month = labels[step];
        assert_eq!(month, month_of_step(step, false).unwrap());
        assert!(v.is_finite());
        // Away from the year wrap the quadratic stays within one
        // month-value of the label's own value. Stencils reaching into
        // the padded knots see this input as a sawtooth rather than a
        // cycle, which affects January, late November, and December.
        if (2..=10).contains(&month) {
            assert!(
                (v - f64::from(month)).abs() <= 1.0 + 1e-9,
                "step {step} (month {month}): {v}"
            );
        }
    }
}

#[test]
fn leap_extension_after_resample() {
    let values: Vec<f64> = (1..=12).map(f64::from).collect();
    let monthly = MonthlySeries::new(values, mid_month_offsets(), 1).unwrap();
    let series = resample_to_3h(&pad_cyclic(&monthly)).unwrap();
    let last = *series.values.last().unwrap();

    let mut data = series.values;
    let mut times = series.times;
    extend_leap(&mut data, &mut times, 1).unwrap();

    assert_eq!(data.len(), 2928);
    assert_eq!(times.len(), 2928);
    for k in 2920..2928 {
        assert_relative_eq!(data[k], last);
    }
    // Times keep the 3-hour cadence across the splice.
    for w in times.windows(2) {
        assert_relative_eq!(w[1] - w[0], 3.0);
    }
}
