//! Chained checks of the snow-anomaly arithmetic.

use approx::assert_relative_eq;

use boreas_perturb::{add_anomaly, sanitize, snow_precip_ratio, synthesize_snow};

#[test]
fn snow_anomaly_chain() {
    // Climatological snow and precip over 4 cells; the third cell is dry
    // and the fourth is masked in the snow climatology.
    let snow = [0.5, 1.0, 0.0, f64::NAN];
    let precip = [1.0, 4.0, 0.0, 2.0];

    let ratio = snow_precip_ratio(&snow, &precip).unwrap();
    assert_relative_eq!(ratio[0], 0.5);
    assert_relative_eq!(ratio[1], 0.25);
    assert_eq!(ratio[2], 0.0);
    assert_eq!(ratio[3], 0.0);

    let precip_anom = [2.0, -0.8, 3.0, 1.5];
    let mut snow_anom = synthesize_snow(&precip_anom, &ratio).unwrap();
    sanitize(&mut snow_anom);

    assert_relative_eq!(snow_anom[0], 1.0);
    assert_relative_eq!(snow_anom[1], -0.2);
    // Dry and masked cells produce exactly zero anomaly.
    assert_eq!(snow_anom[2], 0.0);
    assert_eq!(snow_anom[3], 0.0);
    assert!(snow_anom.iter().all(|v| v.is_finite()));
}

#[test]
fn perturbed_field_preserves_mask_and_adds_elsewhere() {
    let base = [270.0, f64::NAN, 255.5];
    let anomaly = [1.5, 2.0, -0.5];

    let out = add_anomaly(&base, &anomaly).unwrap();
    assert_relative_eq!(out[0], 271.5);
    assert!(out[1].is_nan());
    assert_relative_eq!(out[2], 255.0);
}

#[test]
fn leap_extended_anomaly_matches_base_length() {
    // A 2920-step anomaly cannot be added onto a 2928-step leap-year
    // base; the caller must extend it first.
    let base = vec![0.0; 2928];
    let anomaly = vec![0.1; 2920];
    assert!(add_anomaly(&base, &anomaly).is_err());

    let mut extended = anomaly;
    extended.extend(std::iter::repeat_n(0.1, 8));
    let out = add_anomaly(&base, &extended).unwrap();
    assert_eq!(out.len(), 2928);
    assert_relative_eq!(out[2927], 0.1);
}
