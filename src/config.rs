use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level boreas configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoreasConfig {
    /// Directory layout.
    #[serde(default)]
    pub paths: PathsToml,

    /// Reanalysis forcing settings.
    #[serde(default)]
    pub forcing: ForcingToml,

    /// Scenario metadata and anomaly file naming.
    #[serde(default)]
    pub scenario: ScenarioToml,

    /// Variable mapping table for the `apply` subcommand.
    #[serde(default)]
    pub variables: Vec<VariableToml>,

    /// Retrieval settings for the `fetch` subcommand.
    #[serde(default)]
    pub fetch: FetchToml,
}

/// Loads and parses a TOML configuration file.
pub fn load(path: &Path) -> Result<BoreasConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse configuration TOML")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsToml {
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_perturbed_dir")]
    pub perturbed_dir: PathBuf,
}

impl Default for PathsToml {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            perturbed_dir: default_perturbed_dir(),
        }
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("DATA_in/JRA")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("DATA_out")
}
fn default_perturbed_dir() -> PathBuf {
    PathBuf::from("JRA55_perturb")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForcingToml {
    /// File name template of yearly 3-hourly reanalysis files.
    #[serde(default = "default_reanalysis_template")]
    pub reanalysis_template: String,
    /// File name template of per-year monthly climatology files.
    #[serde(default = "default_monthly_template")]
    pub monthly_template: String,
    /// Time axis variable name.
    #[serde(default = "default_time_var")]
    pub time_var: String,
    /// Common (non-leap) year used for synthetic monthly time axes.
    #[serde(default = "default_nominal_year")]
    pub nominal_year: i32,
    /// Snowfall variable name in the reanalysis files.
    #[serde(default = "default_snow_var")]
    pub snow_var: String,
    /// Total precipitation variable name in the reanalysis files.
    #[serde(default = "default_precip_var")]
    pub precip_var: String,
}

impl Default for ForcingToml {
    fn default() -> Self {
        Self {
            reanalysis_template: default_reanalysis_template(),
            monthly_template: default_monthly_template(),
            time_var: default_time_var(),
            nominal_year: default_nominal_year(),
            snow_var: default_snow_var(),
            precip_var: default_precip_var(),
        }
    }
}

fn default_reanalysis_template() -> String {
    "drowned_{var}_JRA55_y{year}.nc".to_string()
}
fn default_monthly_template() -> String {
    "JRA_monthly_{var}_y{year}.nc".to_string()
}
fn default_time_var() -> String {
    "time".to_string()
}
fn default_nominal_year() -> i32 {
    1951
}
fn default_snow_var() -> String {
    "prsn".to_string()
}
fn default_precip_var() -> String {
    "tprecip".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioToml {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_scenario")]
    pub scenario: String,
    #[serde(default = "default_reference_start")]
    pub reference_start: i32,
    #[serde(default = "default_reference_end")]
    pub reference_end: i32,
    #[serde(default = "default_target_start")]
    pub target_start: i32,
    #[serde(default = "default_target_end")]
    pub target_end: i32,
    #[serde(default)]
    pub contact: String,
    /// File name template of 3-hourly anomaly files.
    #[serde(default = "default_anomaly_template")]
    pub anomaly_template: String,
    /// File name template of perturbed reanalysis output files.
    #[serde(default = "default_perturbed_template")]
    pub perturbed_template: String,
    /// `{var}` slot of the precipitation anomaly file name.
    #[serde(default = "default_precip_anomaly_file_var")]
    pub precip_anomaly_file_var: String,
    /// Variable name inside the precipitation anomaly file.
    #[serde(default = "default_precip_anomaly_var")]
    pub precip_anomaly_var: String,
    /// `{var}` slot of the derived snowfall anomaly file name.
    #[serde(default = "default_snow_anomaly_file_var")]
    pub snow_anomaly_file_var: String,
    /// Variable name of the derived snowfall anomaly.
    #[serde(default = "default_snow_anomaly_var")]
    pub snow_anomaly_var: String,
    /// Long name stamped on the derived snowfall anomaly.
    #[serde(default = "default_snow_long_name")]
    pub snow_long_name: String,
}

impl Default for ScenarioToml {
    fn default() -> Self {
        Self {
            model: default_model(),
            scenario: default_scenario(),
            reference_start: default_reference_start(),
            reference_end: default_reference_end(),
            target_start: default_target_start(),
            target_end: default_target_end(),
            contact: String::new(),
            anomaly_template: default_anomaly_template(),
            perturbed_template: default_perturbed_template(),
            precip_anomaly_file_var: default_precip_anomaly_file_var(),
            precip_anomaly_var: default_precip_anomaly_var(),
            snow_anomaly_file_var: default_snow_anomaly_file_var(),
            snow_anomaly_var: default_snow_anomaly_var(),
            snow_long_name: default_snow_long_name(),
        }
    }
}

fn default_model() -> String {
    "HadCM3".to_string()
}
fn default_scenario() -> String {
    "A1B".to_string()
}
fn default_reference_start() -> i32 {
    1979
}
fn default_reference_end() -> i32 {
    2019
}
fn default_target_start() -> i32 {
    2160
}
fn default_target_end() -> i32 {
    2200
}
fn default_anomaly_template() -> String {
    "{scenario}_{var}_3h_ano_{ext}_on_JRA_grid.nc".to_string()
}
fn default_perturbed_template() -> String {
    "drowned_{var}_JRA55_perturbed_{scenario}_{model}_{ext}_anomaly_y{year}.nc".to_string()
}
fn default_precip_anomaly_file_var() -> String {
    "TOTAL_PRECIP".to_string()
}
fn default_precip_anomaly_var() -> String {
    "dprecip".to_string()
}
fn default_snow_anomaly_file_var() -> String {
    "SNOW".to_string()
}
fn default_snow_anomaly_var() -> String {
    "dsnow".to_string()
}
fn default_snow_long_name() -> String {
    "snowfall rate anomaly derived from total precipitation".to_string()
}

/// One anomaly-to-reanalysis variable mapping for `apply`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableToml {
    /// `{var}` slot of the anomaly file name.
    pub file_var: String,
    /// Variable name inside the anomaly file.
    pub anomaly_var: String,
    /// Variable name in the reanalysis files.
    pub reanalysis_var: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchToml {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_fetch_model")]
    pub model: String,
    #[serde(default = "default_experiment")]
    pub experiment: String,
    #[serde(default = "default_temporal_resolution")]
    pub temporal_resolution: String,
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_date")]
    pub date: String,
    #[serde(default = "default_fetch_variables")]
    pub variables: Vec<String>,
}

impl Default for FetchToml {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_fetch_model(),
            experiment: default_experiment(),
            temporal_resolution: default_temporal_resolution(),
            level: default_level(),
            date: default_date(),
            variables: default_fetch_variables(),
        }
    }
}

fn default_endpoint() -> String {
    "https://cds.climate.copernicus.eu/api/retrieve/v1/processes/projections-cmip6/execute"
        .to_string()
}
fn default_fetch_model() -> String {
    "ipsl_cm6a_lr".to_string()
}
fn default_experiment() -> String {
    "historical".to_string()
}
fn default_temporal_resolution() -> String {
    "monthly".to_string()
}
fn default_level() -> String {
    "single_levels".to_string()
}
fn default_date() -> String {
    "1979-01-01/2019-01-01".to_string()
}
fn default_fetch_variables() -> Vec<String> {
    [
        "eastward_near_surface_wind",
        "northward_near_surface_wind",
        "near_surface_air_temperature",
        "near_surface_specific_humidity",
        "precipitation",
        "snowfall_flux",
        "surface_downwelling_longwave_radiation",
        "surface_downwelling_shortwave_radiation",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
