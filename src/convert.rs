//! Pure conversion helpers: TOML config structs -> crate API types, file
//! name templates -> paths.

use std::path::PathBuf;

use anyhow::{Result, bail};

use boreas_calendar::is_leap_year;
use boreas_io::ReadSpec;
use boreas_perturb::ScenarioMeta;

use crate::config::{BoreasConfig, ForcingToml, ScenarioToml};

/// Fills `{key}` placeholders in a file name template.
pub fn fill_template(template: &str, pairs: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in pairs {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}

/// Builds a [`ScenarioMeta`] from the TOML scenario configuration.
pub fn build_scenario_meta(scenario: &ScenarioToml) -> ScenarioMeta {
    ScenarioMeta {
        model: scenario.model.clone(),
        scenario: scenario.scenario.clone(),
        reference_start: scenario.reference_start,
        reference_end: scenario.reference_end,
        target_start: scenario.target_start,
        target_end: scenario.target_end,
        contact: scenario.contact.clone(),
    }
}

/// Builds a [`ReadSpec`] for `var` using the configured time variable.
pub fn build_read_spec(forcing: &ForcingToml, var: &str) -> ReadSpec {
    ReadSpec::new(var).with_time_var(&forcing.time_var)
}

/// Validates the configured nominal year, which anchors synthetic monthly
/// time axes and must be a common year.
pub fn validate_nominal_year(forcing: &ForcingToml) -> Result<()> {
    if is_leap_year(forcing.nominal_year) {
        bail!(
            "forcing.nominal_year must be a common year, got leap year {}",
            forcing.nominal_year
        );
    }
    Ok(())
}

/// CF-style time units string anchored at January 1 00:00 of `year`.
pub fn time_units(year: i32) -> String {
    format!("hours since {year:04}-01-01 00:00:00")
}

/// Path of the yearly 3-hourly reanalysis file for `var`.
pub fn reanalysis_path(cfg: &BoreasConfig, var: &str, year: i32) -> PathBuf {
    let name = fill_template(
        &cfg.forcing.reanalysis_template,
        &[("var", var), ("year", &year.to_string())],
    );
    cfg.paths.input_dir.join(name)
}

/// Path of the per-year monthly climatology file for `var`.
pub fn monthly_path(cfg: &BoreasConfig, var: &str, year: i32) -> PathBuf {
    let name = fill_template(
        &cfg.forcing.monthly_template,
        &[("var", var), ("year", &year.to_string())],
    );
    cfg.paths.input_dir.join(name)
}

/// File name of a 3-hourly anomaly file for the `{var}` slot `file_var`.
pub fn anomaly_file_name(cfg: &BoreasConfig, file_var: &str, ext: &str) -> String {
    fill_template(
        &cfg.scenario.anomaly_template,
        &[
            ("model", &cfg.scenario.model),
            ("scenario", &cfg.scenario.scenario),
            ("var", file_var),
            ("ext", ext),
        ],
    )
}

/// Path of a 3-hourly anomaly file under the output directory.
pub fn anomaly_path(cfg: &BoreasConfig, file_var: &str, ext: &str) -> PathBuf {
    cfg.paths.output_dir.join(anomaly_file_name(cfg, file_var, ext))
}

/// Path of a perturbed reanalysis output file.
pub fn perturbed_path(cfg: &BoreasConfig, var: &str, year: i32, ext: &str) -> PathBuf {
    let name = fill_template(
        &cfg.scenario.perturbed_template,
        &[
            ("model", &cfg.scenario.model),
            ("scenario", &cfg.scenario.scenario),
            ("var", var),
            ("ext", ext),
            ("year", &year.to_string()),
        ],
    );
    cfg.paths
        .output_dir
        .join(&cfg.paths.perturbed_dir)
        .join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> BoreasConfig {
        toml::from_str("").unwrap()
    }

    #[test]
    fn template_fills_all_slots() {
        let out = fill_template(
            "{model}_{scenario}_{var}_3h_ano_{ext}.nc",
            &[
                ("model", "IPSL-CM6A-LR"),
                ("scenario", "ssp585-historical"),
                ("var", "pr"),
                ("ext", "20602100-19792019"),
            ],
        );
        assert_eq!(
            out,
            "IPSL-CM6A-LR_ssp585-historical_pr_3h_ano_20602100-19792019.nc"
        );
    }

    #[test]
    fn template_leaves_unknown_slots() {
        let out = fill_template("{var}_{year}.nc", &[("var", "tas")]);
        assert_eq!(out, "tas_{year}.nc");
    }

    #[test]
    fn reanalysis_path_layout() {
        let cfg = default_config();
        let path = reanalysis_path(&cfg, "tas", 1984);
        assert_eq!(
            path,
            PathBuf::from("DATA_in/JRA/drowned_tas_JRA55_y1984.nc")
        );
    }

    #[test]
    fn monthly_path_layout() {
        let cfg = default_config();
        let path = monthly_path(&cfg, "prsn", 2001);
        assert_eq!(path, PathBuf::from("DATA_in/JRA/JRA_monthly_prsn_y2001.nc"));
    }

    #[test]
    fn anomaly_name_default_scenario() {
        let cfg = default_config();
        let name = anomaly_file_name(&cfg, "SNOW", "21602200-19792019");
        assert_eq!(name, "A1B_SNOW_3h_ano_21602200-19792019_on_JRA_grid.nc");
    }

    #[test]
    fn perturbed_path_nested_under_output() {
        let cfg = default_config();
        let path = perturbed_path(&cfg, "tas", 1984, "21602200-19792019");
        assert_eq!(
            path,
            PathBuf::from(
                "DATA_out/JRA55_perturb/drowned_tas_JRA55_perturbed_A1B_HadCM3_21602200-19792019_anomaly_y1984.nc"
            )
        );
    }

    #[test]
    fn scenario_meta_period_ext() {
        let cfg = default_config();
        let meta = build_scenario_meta(&cfg.scenario);
        assert_eq!(meta.period_ext(), "21602200-19792019");
    }

    #[test]
    fn nominal_year_validation() {
        let mut cfg = default_config();
        assert!(validate_nominal_year(&cfg.forcing).is_ok());
        cfg.forcing.nominal_year = 2000;
        assert!(validate_nominal_year(&cfg.forcing).is_err());
    }

    #[test]
    fn time_units_format() {
        assert_eq!(time_units(1951), "hours since 1951-01-01 00:00:00");
    }
}
