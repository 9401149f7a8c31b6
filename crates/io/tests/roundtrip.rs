//! Write-then-read checks against real NetCDF files in a temp directory.

use approx::assert_relative_eq;
use tempfile::TempDir;

use boreas_io::{GridField, IoError, ReadSpec, read_field, write_field};

fn make_field() -> GridField {
    let nt = 4;
    let ny = 3;
    let nx = 2;
    let data: Vec<f64> = (0..nt * ny * nx).map(|i| i as f64 * 0.5).collect();
    let mut field = GridField::new(
        "tprecip",
        data,
        vec![-80.0, -75.0, -70.0],
        vec![10.0, 20.0],
        vec![0.0, 3.0, 6.0, 9.0],
        "hours since 1951-01-01 00:00:00",
    )
    .unwrap();
    field
        .var_attrs
        .insert("units".to_string(), "kg/m2/s".to_string());
    field
        .var_attrs
        .insert("long_name".to_string(), "total precipitation".to_string());
    field
        .global_attrs
        .insert("Description".to_string(), "test file".to_string());
    field
}

#[test]
fn roundtrip_preserves_data_and_axes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("field.nc");
    let field = make_field();

    write_field(&path, &field).unwrap();
    let back = read_field(&path, &ReadSpec::new("tprecip")).unwrap();

    assert_eq!(back.shape(), field.shape());
    assert_eq!(back.time_units, field.time_units);
    for (a, b) in back.data.iter().zip(field.data.iter()) {
        assert_relative_eq!(a, b);
    }
    for (a, b) in back.time.iter().zip(field.time.iter()) {
        assert_relative_eq!(a, b);
    }
    assert_eq!(back.lats, field.lats);
    assert_eq!(back.lons, field.lons);
}

#[test]
fn roundtrip_preserves_string_attributes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("attrs.nc");
    let field = make_field();

    write_field(&path, &field).unwrap();
    let back = read_field(&path, &ReadSpec::new("tprecip")).unwrap();

    assert_eq!(back.var_attrs.get("units").map(String::as_str), Some("kg/m2/s"));
    assert_eq!(
        back.var_attrs.get("long_name").map(String::as_str),
        Some("total precipitation")
    );
    assert_eq!(
        back.global_attrs.get("Description").map(String::as_str),
        Some("test file")
    );
}

#[test]
fn reading_missing_variable_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("field.nc");
    write_field(&path, &make_field()).unwrap();

    let err = read_field(&path, &ReadSpec::new("prsn")).unwrap_err();
    assert!(matches!(err, IoError::MissingVariable { ref name, .. } if name == "prsn"));
}

#[test]
fn writing_inconsistent_field_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.nc");
    let mut field = make_field();
    field.data.pop();

    let err = write_field(&path, &field).unwrap_err();
    assert!(matches!(err, IoError::DimensionMismatch { .. }));
}

#[test]
fn time_axis_alias_lookup() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("field.nc");
    write_field(&path, &make_field()).unwrap();

    // Coordinates were written as "lat"/"lon"; aliases that list those
    // names later in the chain must still resolve.
    let spec = ReadSpec::new("tprecip")
        .with_lat_aliases(vec!["latitude".into(), "lat".into()])
        .with_lon_aliases(vec!["longitude".into(), "lon".into()]);
    let back = read_field(&path, &spec).unwrap();
    assert_eq!(back.n_cells(), 6);
}
