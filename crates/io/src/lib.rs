//! # boreas-io
//!
//! Read and write gridded `time x lat x lon` forcing fields as NetCDF.
//! Bridges the file format into boreas's internal `Vec<f64>` + shape
//! based APIs: a whole variable is held flat in row-major order with its
//! coordinate axes and attributes alongside.

mod error;
mod field;
mod read;
mod write;

pub use error::IoError;
pub use field::GridField;
pub use read::{ReadSpec, read_field};
pub use write::write_field;
