//! Owned in-memory representation of one gridded variable.

use std::collections::BTreeMap;

use crate::error::IoError;

/// One gridded variable held in memory: flat row-major data with shape
/// `[nt, ny, nx]`, coordinate axes, and string attributes.
///
/// Fields are public so pipeline stages can rework the data and time axis
/// in place; [`GridField::validate`] re-checks the invariants and is run
/// again before any write.
#[derive(Debug, Clone)]
pub struct GridField {
    /// NetCDF variable name.
    pub name: String,
    /// Flat data, row-major over `[nt, ny, nx]`.
    pub data: Vec<f64>,
    /// Latitude axis (length `ny`).
    pub lats: Vec<f64>,
    /// Longitude axis (length `nx`).
    pub lons: Vec<f64>,
    /// Time offsets in the units given by `time_units` (length `nt`).
    pub time: Vec<f64>,
    /// CF-style time units string, e.g. `"hours since 1951-01-01 00:00:00"`.
    pub time_units: String,
    /// String-valued attributes of the data variable.
    pub var_attrs: BTreeMap<String, String>,
    /// String-valued global attributes of the file.
    pub global_attrs: BTreeMap<String, String>,
}

impl GridField {
    /// Creates a new field after validating axis and data lengths.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if `data.len()` is not
    /// `time.len() * lats.len() * lons.len()`.
    pub fn new(
        name: impl Into<String>,
        data: Vec<f64>,
        lats: Vec<f64>,
        lons: Vec<f64>,
        time: Vec<f64>,
        time_units: impl Into<String>,
    ) -> Result<Self, IoError> {
        let field = Self {
            name: name.into(),
            data,
            lats,
            lons,
            time,
            time_units: time_units.into(),
            var_attrs: BTreeMap::new(),
            global_attrs: BTreeMap::new(),
        };
        field.validate()?;
        Ok(field)
    }

    /// Checks that the flat data length matches the coordinate axes.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] on any inconsistency.
    pub fn validate(&self) -> Result<(), IoError> {
        let expected = self.time.len() * self.lats.len() * self.lons.len();
        if self.data.len() != expected {
            return Err(IoError::DimensionMismatch {
                name: format!("{} data", self.name),
                expected,
                got: self.data.len(),
            });
        }
        Ok(())
    }

    /// Number of time steps.
    pub fn n_steps(&self) -> usize {
        self.time.len()
    }

    /// Number of grid cells per time step (`ny * nx`).
    pub fn n_cells(&self) -> usize {
        self.lats.len() * self.lons.len()
    }

    /// The shape `[nt, ny, nx]`.
    pub fn shape(&self) -> [usize; 3] {
        [self.time.len(), self.lats.len(), self.lons.len()]
    }

    /// The data of time step `t` as a flat `ny * nx` slice.
    ///
    /// # Panics
    ///
    /// Panics if `t` is out of range; step indices come from iterating
    /// `0..n_steps()`.
    pub fn frame(&self, t: usize) -> &[f64] {
        let n = self.n_cells();
        &self.data[t * n..(t + 1) * n]
    }

    /// Returns `true` if `other` is defined on the same spatial grid.
    pub fn same_grid(&self, other: &GridField) -> bool {
        self.lats == other.lats && self.lons == other.lons
    }
}
