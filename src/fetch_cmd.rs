//! Fetch command: download monthly climate-model fields from a CDS-style
//! retrieval endpoint, one zip archive per variable.

use anyhow::{Context, Result, bail};
use serde_json::json;
use tracing::{info, info_span};

use crate::cli::FetchArgs;
use crate::config;

/// Run the retrieval loop.
pub fn run(args: FetchArgs) -> Result<()> {
    let _cmd = info_span!("fetch").entered();

    let cfg = config::load(&args.config)?;
    if cfg.fetch.variables.is_empty() {
        bail!("no fetch variables configured");
    }

    let out_dir = args.output.unwrap_or_else(|| cfg.paths.output_dir.clone());
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory: {}", out_dir.display()))?;

    let client = reqwest::blocking::Client::new();

    for var in &cfg.fetch.variables {
        let body = json!({
            "temporal_resolution": cfg.fetch.temporal_resolution,
            "experiment": cfg.fetch.experiment,
            "level": cfg.fetch.level,
            "variable": var,
            "model": cfg.fetch.model,
            "date": cfg.fetch.date,
            "format": "zip",
        });

        info!(variable = %var, endpoint = %cfg.fetch.endpoint, "requesting retrieval");
        let response = client
            .post(&cfg.fetch.endpoint)
            .json(&body)
            .send()
            .with_context(|| format!("retrieval request failed for {var}"))?
            .error_for_status()
            .with_context(|| format!("retrieval rejected for {var}"))?;

        let bytes = response
            .bytes()
            .with_context(|| format!("failed to download archive for {var}"))?;

        let path = out_dir.join(format!("{var}.zip"));
        std::fs::write(&path, &bytes)
            .with_context(|| format!("failed to write archive: {}", path.display()))?;
        info!(path = %path.display(), n_bytes = bytes.len(), "saved archive");
    }

    Ok(())
}
