//! Apply command: add 3-hourly anomaly fields onto yearly reanalysis
//! files, duplicating the final anomaly day for leap years.

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span};

use boreas_calendar::{STEPS_PER_YEAR, is_leap_year};
use boreas_interp::extend_leap;
use boreas_io::{GridField, read_field, write_field};
use boreas_perturb::{ScenarioMeta, add_anomaly, perturbed_global_attrs};

use crate::cli::ApplyArgs;
use crate::config::{BoreasConfig, VariableToml};
use crate::{config, convert};

/// Run the perturbation pipeline.
pub fn run(args: ApplyArgs) -> Result<()> {
    let _cmd = info_span!("apply").entered();

    if args.end_year < args.start_year {
        bail!(
            "end year {} is before start year {}",
            args.end_year,
            args.start_year
        );
    }

    let cfg = config::load(&args.config)?;
    if cfg.variables.is_empty() {
        bail!("no [[variables]] configured: nothing to apply");
    }

    let meta = convert::build_scenario_meta(&cfg.scenario);
    let ext = args.fileext.unwrap_or_else(|| meta.period_ext());

    let out_dir = cfg.paths.output_dir.join(&cfg.paths.perturbed_dir);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory: {}", out_dir.display()))?;

    for mapping in &cfg.variables {
        let _var = info_span!("variable", var = %mapping.reanalysis_var).entered();
        apply_variable(&cfg, &meta, mapping, &ext, args.start_year, args.end_year)?;
    }

    info!("all variables perturbed");
    Ok(())
}

/// Perturb every requested year of one variable.
fn apply_variable(
    cfg: &BoreasConfig,
    meta: &ScenarioMeta,
    mapping: &VariableToml,
    ext: &str,
    start_year: i32,
    end_year: i32,
) -> Result<()> {
    let anom_name = convert::anomaly_file_name(cfg, &mapping.file_var, ext);
    let anom_path = convert::anomaly_path(cfg, &mapping.file_var, ext);
    info!(path = %anom_path.display(), "reading anomaly");
    let anomaly = read_field(
        &anom_path,
        &convert::build_read_spec(&cfg.forcing, &mapping.anomaly_var),
    )
    .with_context(|| format!("failed to read anomaly file: {}", anom_path.display()))?;

    if anomaly.n_steps() != STEPS_PER_YEAR {
        bail!(
            "{} has {} time steps, expected {}",
            anom_path.display(),
            anomaly.n_steps(),
            STEPS_PER_YEAR
        );
    }

    let n_years = (end_year - start_year + 1) as u64;
    let bar = ProgressBar::new(n_years).with_style(
        ProgressStyle::with_template("{msg:12} [{bar:40}] {pos}/{len} years")
            .expect("valid progress template")
            .progress_chars("=> "),
    );
    bar.set_message(mapping.reanalysis_var.clone());

    for year in start_year..=end_year {
        apply_year(cfg, meta, mapping, &anomaly, &anom_name, ext, year)?;
        bar.inc(1);
    }
    bar.finish();
    Ok(())
}

/// Perturb one reanalysis year with the (possibly leap-extended) anomaly.
fn apply_year(
    cfg: &BoreasConfig,
    meta: &ScenarioMeta,
    mapping: &VariableToml,
    anomaly: &GridField,
    anom_name: &str,
    ext: &str,
    year: i32,
) -> Result<()> {
    let in_path = convert::reanalysis_path(cfg, &mapping.reanalysis_var, year);
    let base = read_field(
        &in_path,
        &convert::build_read_spec(&cfg.forcing, &mapping.reanalysis_var),
    )
    .with_context(|| format!("failed to read reanalysis file: {}", in_path.display()))?;

    if !base.same_grid(anomaly) {
        bail!(
            "{} and {} are on different grids",
            in_path.display(),
            anom_name
        );
    }

    let mut anom_data = anomaly.data.clone();
    let mut anom_time = anomaly.time.clone();
    if is_leap_year(year) {
        info!(year, "leap year: repeating final anomaly frame over one day");
        extend_leap(&mut anom_data, &mut anom_time, anomaly.n_cells())?;
    }
    if anom_data.len() != base.data.len() {
        bail!(
            "anomaly has {} values after leap handling, reanalysis year {} has {}",
            anom_data.len(),
            year,
            base.data.len()
        );
    }

    let mut out = base;
    out.data = add_anomaly(&out.data, &anom_data)?;
    out.global_attrs
        .extend(perturbed_global_attrs(meta, anom_name));

    let out_path = convert::perturbed_path(cfg, &mapping.reanalysis_var, year, ext);
    write_field(&out_path, &out)
        .with_context(|| format!("failed to write perturbed file: {}", out_path.display()))?;
    Ok(())
}
