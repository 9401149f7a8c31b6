//! Snow-anomaly command: reconstruct a 3-hourly snowfall anomaly from the
//! precipitation anomaly via the climatological snow/precipitation ratio.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use boreas_calendar::{STEPS_PER_YEAR, mid_month_offsets};
use boreas_clim::{MonthlyClimatology, average_years};
use boreas_interp::{MonthlySeries, pad_cyclic, resample_to_3h};
use boreas_io::{GridField, read_field, write_field};
use boreas_perturb::{
    anomaly_global_attrs, anomaly_var_attrs, sanitize, snow_precip_ratio, synthesize_snow,
};

use crate::cli::SnowAnomalyArgs;
use crate::config::BoreasConfig;
use crate::{config, convert};

/// Variable name of the ratio diagnostic file.
const RATIO_VAR: &str = "snow_over_precip";

/// How the snowfall anomaly is derived, stamped into the output file.
const METHOD: &str = "snow_ano = precip_ano * snow_clim / precip_clim; the snowfall \
     fraction of total precipitation is assumed unchanged because the anomaly source \
     provides no snowfall variable";

/// Run the snow-anomaly pipeline.
pub fn run(args: SnowAnomalyArgs) -> Result<()> {
    let _cmd = info_span!("snow_anomaly").entered();

    let cfg = config::load(&args.config)?;
    convert::validate_nominal_year(&cfg.forcing)?;

    let meta = convert::build_scenario_meta(&cfg.scenario);
    let ext = args.fileext.unwrap_or_else(|| meta.period_ext());

    std::fs::create_dir_all(&cfg.paths.output_dir).with_context(|| {
        format!(
            "failed to create output directory: {}",
            cfg.paths.output_dir.display()
        )
    })?;

    // -- Reference-period climatologies -------------------------------------

    let snow_clim = reference_climatology(&cfg, &cfg.forcing.snow_var)?;
    let precip_clim = reference_climatology(&cfg, &cfg.forcing.precip_var)?;
    if !snow_clim.same_grid(&precip_clim) {
        bail!("snow and precipitation climatologies are on different grids");
    }
    info!(
        reference_start = meta.reference_start,
        reference_end = meta.reference_end,
        "built reference climatologies"
    );

    write_diagnostic(&cfg, &snow_clim, "snow.nc")?;
    write_diagnostic(&cfg, &precip_clim, "precip.nc")?;

    // -- Guarded ratio, upsampled to 3-hourly --------------------------------

    let ratio = snow_precip_ratio(&snow_clim.data, &precip_clim.data)?;

    let mut ratio_field = GridField::new(
        RATIO_VAR,
        ratio.clone(),
        snow_clim.lats.clone(),
        snow_clim.lons.clone(),
        snow_clim.time.clone(),
        snow_clim.time_units.clone(),
    )?;
    ratio_field.var_attrs.insert(
        "long_name".to_string(),
        "climatological snowfall fraction of total precipitation".to_string(),
    );
    write_diagnostic(&cfg, &ratio_field, "ratio.nc")?;

    let monthly = MonthlySeries::new(ratio, mid_month_offsets(), snow_clim.n_cells())?;
    let ratio_3h = resample_to_3h(&pad_cyclic(&monthly))?;
    info!(n_steps = ratio_3h.n_steps(), "upsampled ratio to 3-hourly");

    // -- Synthesize the snowfall anomaly -------------------------------------

    let anom_path = convert::anomaly_path(&cfg, &cfg.scenario.precip_anomaly_file_var, &ext);
    info!(path = %anom_path.display(), "reading precipitation anomaly");
    let precip_anom = read_field(
        &anom_path,
        &convert::build_read_spec(&cfg.forcing, &cfg.scenario.precip_anomaly_var),
    )
    .with_context(|| format!("failed to read anomaly file: {}", anom_path.display()))?;

    if precip_anom.n_steps() != STEPS_PER_YEAR {
        bail!(
            "{} has {} time steps, expected {}",
            anom_path.display(),
            precip_anom.n_steps(),
            STEPS_PER_YEAR
        );
    }
    if precip_anom.n_cells() != ratio_3h.cells {
        bail!(
            "anomaly grid has {} cells, climatology has {}",
            precip_anom.n_cells(),
            ratio_3h.cells
        );
    }

    let mut snow_values = synthesize_snow(&precip_anom.data, &ratio_3h.values)?;
    sanitize(&mut snow_values);

    let mut out = GridField::new(
        &cfg.scenario.snow_anomaly_var,
        snow_values,
        precip_anom.lats.clone(),
        precip_anom.lons.clone(),
        precip_anom.time.clone(),
        precip_anom.time_units.clone(),
    )?;
    out.var_attrs = anomaly_var_attrs(
        &precip_anom.var_attrs,
        &cfg.scenario.snow_anomaly_var,
        &cfg.scenario.snow_long_name,
    );
    out.global_attrs = anomaly_global_attrs(&meta, METHOD);

    let out_path = convert::anomaly_path(&cfg, &cfg.scenario.snow_anomaly_file_var, &ext);
    write_field(&out_path, &out)
        .with_context(|| format!("failed to write snow anomaly: {}", out_path.display()))?;
    info!(path = %out_path.display(), "wrote snow anomaly");
    Ok(())
}

/// Averages the per-year monthly files of `var` over the reference period
/// into one 12-frame field.
fn reference_climatology(cfg: &BoreasConfig, var: &str) -> Result<GridField> {
    // The reference slice runs from January of the start year up to (and
    // not including) January of the end year, so the end year's monthly
    // frames are excluded.
    let years = cfg.scenario.reference_start..cfg.scenario.reference_end;
    if years.is_empty() {
        bail!(
            "reference period {}..{} is empty",
            cfg.scenario.reference_start,
            cfg.scenario.reference_end
        );
    }

    let mut template: Option<GridField> = None;
    let mut climatologies = Vec::new();

    for year in years {
        let path = convert::monthly_path(cfg, var, year);
        let field = read_field(&path, &convert::build_read_spec(&cfg.forcing, var))
            .with_context(|| format!("failed to read monthly file: {}", path.display()))?;
        if field.n_steps() != 12 {
            bail!(
                "{} has {} time steps, expected 12 monthly frames",
                path.display(),
                field.n_steps()
            );
        }
        if let Some(ref t) = template {
            if !t.same_grid(&field) {
                bail!("{} is on a different grid", path.display());
            }
        }

        climatologies.push(MonthlyClimatology::new(
            field.data.clone(),
            field.n_cells(),
        )?);
        if template.is_none() {
            template = Some(field);
        }
    }

    let mean = average_years(&climatologies)?;
    let mut out = template.expect("reference period is non-empty");
    out.data = mean.into_values();
    out.time = mid_month_offsets().to_vec();
    out.time_units = convert::time_units(cfg.forcing.nominal_year);
    Ok(out)
}

/// Writes a 12-frame diagnostic field into the output directory.
fn write_diagnostic(cfg: &BoreasConfig, field: &GridField, name: &str) -> Result<()> {
    let path = cfg.paths.output_dir.join(name);
    write_field(&path, field)
        .with_context(|| format!("failed to write diagnostic: {}", path.display()))?;
    info!(path = %path.display(), "wrote diagnostic");
    Ok(())
}
