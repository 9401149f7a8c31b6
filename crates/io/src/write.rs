//! NetCDF creation from [`GridField`].

use std::path::Path;

use tracing::debug;

use crate::error::IoError;
use crate::field::GridField;

/// Writes a [`GridField`] to a new NetCDF file at `path`.
///
/// The layout matches the reanalysis-format inputs: `time` is the
/// unlimited dimension, `lat`/`lon` are fixed, all variables are `f64`,
/// and the time coordinate carries the field's units string. Variable and
/// global string attributes are written as-is.
///
/// # Errors
///
/// Returns [`IoError::DimensionMismatch`] if the field fails
/// [`GridField::validate`], or [`IoError::Netcdf`] on any library failure
/// (including an unwritable path).
pub fn write_field(path: &Path, field: &GridField) -> Result<(), IoError> {
    field.validate()?;

    let [nt, ny, nx] = field.shape();
    let mut file = netcdf::create(path)?;

    file.add_unlimited_dimension("time")?;
    file.add_dimension("lat", ny)?;
    file.add_dimension("lon", nx)?;

    let mut time_var = file.add_variable::<f64>("time", &["time"])?;
    time_var.put_values(&field.time, [0..nt])?;
    time_var.put_attribute("units", field.time_units.as_str())?;

    let mut lat_var = file.add_variable::<f64>("lat", &["lat"])?;
    lat_var.put_values(&field.lats, [0..ny])?;
    lat_var.put_attribute("units", "degrees_north")?;

    let mut lon_var = file.add_variable::<f64>("lon", &["lon"])?;
    lon_var.put_values(&field.lons, [0..nx])?;
    lon_var.put_attribute("units", "degrees_east")?;

    let mut data_var = file.add_variable::<f64>(&field.name, &["time", "lat", "lon"])?;
    data_var.put_values(&field.data, (0..nt, 0..ny, 0..nx))?;
    for (name, value) in &field.var_attrs {
        data_var.put_attribute(name, value.as_str())?;
    }

    for (name, value) in &field.global_attrs {
        file.add_attribute(name, value.as_str())?;
    }

    debug!(path = %path.display(), var = field.name, nt, ny, nx, "wrote field");
    Ok(())
}
