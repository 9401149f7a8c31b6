//! Climatology command: per-year monthly means of 3-hourly reanalysis
//! files.

use anyhow::{Context, Result, bail};
use tracing::{debug_span, info, info_span};

use boreas_calendar::{mid_month_offsets, step_months};
use boreas_clim::monthly_mean;
use boreas_io::{GridField, read_field, write_field};

use crate::cli::ClimatologyArgs;
use crate::{config, convert};

/// Run the climatology pipeline.
pub fn run(args: ClimatologyArgs) -> Result<()> {
    let _cmd = info_span!("climatology").entered();

    if args.end_year < args.start_year {
        bail!(
            "end year {} is before start year {}",
            args.end_year,
            args.start_year
        );
    }

    let cfg = config::load(&args.config)?;
    let vars = [
        cfg.forcing.snow_var.clone(),
        cfg.forcing.precip_var.clone(),
    ];

    for year in args.start_year..=args.end_year {
        let _year = debug_span!("year", year).entered();
        for var in &vars {
            process_variable(&cfg, var, year)?;
        }
    }

    info!("monthly climatologies written");
    Ok(())
}

/// Compute and write one variable's monthly climatology for one year.
fn process_variable(cfg: &config::BoreasConfig, var: &str, year: i32) -> Result<()> {
    let in_path = convert::reanalysis_path(cfg, var, year);
    info!(path = %in_path.display(), var, year, "reading reanalysis year");
    let field = read_field(&in_path, &convert::build_read_spec(&cfg.forcing, var))
        .with_context(|| format!("failed to read reanalysis file: {}", in_path.display()))?;

    let months = step_months(year);
    if field.n_steps() != months.len() {
        bail!(
            "{} has {} time steps, expected {} for year {}",
            in_path.display(),
            field.n_steps(),
            months.len(),
            year
        );
    }

    let clim = monthly_mean(&field.data, &months, field.n_cells())
        .with_context(|| format!("monthly mean failed for {var} year {year}"))?;

    // Monthly frames are stamped mid-month within the data year.
    let mut out = GridField::new(
        var,
        clim.into_values(),
        field.lats.clone(),
        field.lons.clone(),
        mid_month_offsets().to_vec(),
        convert::time_units(year),
    )?;
    out.var_attrs = field.var_attrs.clone();
    out.global_attrs = field.global_attrs.clone();

    let out_path = convert::monthly_path(cfg, var, year);
    write_field(&out_path, &out)
        .with_context(|| format!("failed to write monthly file: {}", out_path.display()))?;
    info!(path = %out_path.display(), "wrote monthly climatology");
    Ok(())
}
