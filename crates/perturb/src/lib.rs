//! # boreas-perturb
//!
//! Elementwise anomaly arithmetic for the perturbation pipeline: adding
//! climate-model anomalies onto reanalysis fields, deriving a synthetic
//! snowfall anomaly from a precipitation anomaly through a guarded
//! climatological ratio, and the attribute bookkeeping that stamps the
//! resulting files.

mod anomaly;
mod attrs;
mod error;
mod ratio;

pub use anomaly::{add_anomaly, sanitize, synthesize_snow};
pub use attrs::{ScenarioMeta, anomaly_global_attrs, anomaly_var_attrs, perturbed_global_attrs};
pub use error::PerturbError;
pub use ratio::snow_precip_ratio;
