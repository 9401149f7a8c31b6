//! NetCDF extraction into [`GridField`].

use std::collections::BTreeMap;
use std::path::Path;

use netcdf::AttributeValue;
use tracing::debug;

use crate::error::IoError;
use crate::field::GridField;

/// Configuration for reading one variable from a NetCDF forcing file.
///
/// Use the builder methods (`with_*`) to customise coordinate aliases and
/// the time variable name. The [`ReadSpec::new`] defaults suit JRA-style
/// reanalysis files.
#[derive(Debug, Clone)]
pub struct ReadSpec {
    /// NetCDF variable name to extract.
    var: String,
    /// Aliases to try when looking up the latitude axis.
    lat_aliases: Vec<String>,
    /// Aliases to try when looking up the longitude axis.
    lon_aliases: Vec<String>,
    /// NetCDF variable name for the time axis.
    time_var: String,
}

impl ReadSpec {
    /// Creates a spec for `var` with default coordinate aliases.
    pub fn new(var: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            lat_aliases: vec!["lat".into(), "latitude".into(), "y".into()],
            lon_aliases: vec!["lon".into(), "longitude".into(), "x".into()],
            time_var: "time".into(),
        }
    }

    /// Sets the latitude axis aliases.
    pub fn with_lat_aliases(mut self, aliases: Vec<String>) -> Self {
        self.lat_aliases = aliases;
        self
    }

    /// Sets the longitude axis aliases.
    pub fn with_lon_aliases(mut self, aliases: Vec<String>) -> Self {
        self.lon_aliases = aliases;
        self
    }

    /// Sets the time variable name.
    pub fn with_time_var(mut self, name: impl Into<String>) -> Self {
        self.time_var = name.into();
        self
    }

    /// The variable name this spec extracts.
    pub fn var(&self) -> &str {
        &self.var
    }
}

/// Reads one `time x lat x lon` variable from a NetCDF file, together with
/// its coordinate axes and string attributes.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist,
/// [`IoError::MissingVariable`] if the variable or a coordinate cannot be
/// located, [`IoError::DimensionMismatch`] if the variable is not 3-D, and
/// [`IoError::InvalidTime`] if the time variable has no `units` attribute.
pub fn read_field(path: &Path, spec: &ReadSpec) -> Result<GridField, IoError> {
    let file = open_file(path)?;

    let lat_aliases: Vec<&str> = spec.lat_aliases.iter().map(String::as_str).collect();
    let lon_aliases: Vec<&str> = spec.lon_aliases.iter().map(String::as_str).collect();
    let lats = read_1d_f64(&file, &lat_aliases, path)?;
    let lons = read_1d_f64(&file, &lon_aliases, path)?;

    let time = read_1d_f64(&file, &[spec.time_var.as_str()], path)?;
    let time_units = read_time_units(&file, &spec.time_var)?;

    let (data, [nt, ny, nx]) = read_3d_f64(&file, &spec.var, path)?;
    if nt != time.len() {
        return Err(IoError::DimensionMismatch {
            name: spec.time_var.clone(),
            expected: nt,
            got: time.len(),
        });
    }
    if ny != lats.len() || nx != lons.len() {
        return Err(IoError::DimensionMismatch {
            name: format!("{} grid", spec.var),
            expected: ny * nx,
            got: lats.len() * lons.len(),
        });
    }

    let var = file
        .variable(&spec.var)
        .ok_or_else(|| IoError::MissingVariable {
            name: spec.var.clone(),
            path: path.to_path_buf(),
        })?;

    let mut field = GridField::new(&spec.var, data, lats, lons, time, time_units)?;
    field.var_attrs = string_attributes(var.attributes());
    field.global_attrs = string_attributes(file.attributes());
    debug!(
        path = %path.display(),
        var = spec.var,
        nt, ny, nx,
        "read field"
    );
    Ok(field)
}

/// Opens a NetCDF file at `path`, returning [`IoError::FileNotFound`] if
/// the path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Reads a 1-D `f64` variable, trying each alias in order.
///
/// Returns the data from the first alias that matches. If none match,
/// returns [`IoError::MissingVariable`] with the first alias as the name.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var.get_values::<f64, _>(..)?);
        }
    }

    let name = aliases.first().copied().unwrap_or("unknown");
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Reads a 3-D `f64` variable and returns the flattened data together with
/// the shape `[nt, ny, nx]` derived from the variable's dimensions.
pub(crate) fn read_3d_f64(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<(Vec<f64>, [usize; 3]), IoError> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| IoError::MissingVariable {
            name: var_name.to_string(),
            path: path.to_path_buf(),
        })?;

    let dims = var.dimensions();
    if dims.len() != 3 {
        return Err(IoError::DimensionMismatch {
            name: format!("{var_name} dimensions"),
            expected: 3,
            got: dims.len(),
        });
    }

    let nt = dims[0].len();
    let ny = dims[1].len();
    let nx = dims[2].len();

    let data = var.get_values::<f64, _>(..)?;
    Ok((data, [nt, ny, nx]))
}

/// Reads the `units` attribute of the time variable.
fn read_time_units(file: &netcdf::File, time_var: &str) -> Result<String, IoError> {
    let var = file.variable(time_var).ok_or_else(|| IoError::InvalidTime {
        reason: format!("time variable '{time_var}' is missing"),
    })?;

    var.attribute_value("units")
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("time variable '{time_var}' has no 'units' attribute"),
        })?
        .map_err(|e| IoError::InvalidTime {
            reason: format!("failed to read 'units' attribute: {e}"),
        })?
        .try_into()
        .map_err(|e: netcdf::Error| IoError::InvalidTime {
            reason: format!("'units' attribute is not a string: {e}"),
        })
}

/// Collects the string-valued attributes from an attribute iterator.
///
/// Non-string attributes (fill values, valid ranges) are not carried
/// through the pipeline.
fn string_attributes<'a>(
    attrs: impl Iterator<Item = netcdf::Attribute<'a>>,
) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for attr in attrs {
        if let Ok(AttributeValue::Str(s)) = attr.value() {
            out.insert(attr.name().to_string(), s);
        }
    }
    out
}
