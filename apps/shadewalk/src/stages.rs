//! The three pipeline stages, each reading its inputs from and writing its
//! outputs to the run directory of a [`RunConfig`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use sw_core::{RunConfig, SampleRng};
use sw_fetch::{FetchOptions, FetchReport, RoutingClient, write_failures_csv};
use sw_metrics::{Aggregation, aggregate, write_table};
use sw_sampling::{OdDistance, OdPair, PairingStrategy, generate_pairs, load_study_area, with_distances, write_od_csv};

// ── Sampling ──────────────────────────────────────────────────────────────────

/// Sample OD pairs in the configured area and write the OD table.
pub fn sample_pairs(config: &RunConfig, config_path: &Path) -> Result<Vec<OdDistance>> {
    let paths = config.run_paths();
    paths.create_dirs()?;
    copy_config(config_path, &paths.config_copy())?;

    let area = load_study_area(&config.aoi)
        .with_context(|| format!("cannot load study area {}", config.aoi.display()))?;
    let mut rng = SampleRng::from_optional_seed(config.seed);
    let strategy = PairingStrategy::from_mode(config.pairing, config.n_pairs);
    info!("sampling {} points with seed {}, pairing {strategy:?}", config.n_points, rng.seed());

    let pairs = generate_pairs(&area, config.n_points, strategy, &mut rng)?;
    let table = with_distances(&pairs);

    let out = paths.od_pairs_file();
    write_od_csv(&out, &table)?;
    info!("wrote {} OD pairs to {}", table.len(), out.display());
    Ok(table)
}

fn copy_config(from: &Path, to: &Path) -> Result<()> {
    let same = match (from.canonicalize(), to.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    if !same {
        std::fs::copy(from, to)
            .with_context(|| format!("cannot copy config to {}", to.display()))?;
    }
    Ok(())
}

// ── Fetching ──────────────────────────────────────────────────────────────────

/// Request routes for the OD table through `client` and write the failure
/// log.
pub fn fetch_routes<C: RoutingClient + ?Sized>(config: &RunConfig, client: &C) -> Result<FetchReport> {
    let paths = config.run_paths();
    paths.create_dirs()?;

    let od_file = paths.od_pairs_file();
    let table = sw_sampling::read_od_csv(&od_file)
        .with_context(|| format!("cannot read OD table {}; run sample_pairs first", od_file.display()))?;
    let pairs: Vec<OdPair> = table.iter().map(OdDistance::pair).collect();

    let options = FetchOptions::from_config(config);
    let report = sw_fetch::fetch_routes(
        client,
        &pairs,
        &config.times_of_day,
        &config.preferences,
        &options,
        &paths.routes_dir,
    );

    write_failures_csv(&paths.failures_file(), &report.failures)?;
    info!(
        "{} requests, {} routes written, {} failed, {} not attempted",
        report.attempts,
        report.succeeded(),
        report.failures.len(),
        report.not_attempted,
    );
    Ok(report)
}

// ── Metrics ───────────────────────────────────────────────────────────────────

/// Aggregate every route artifact of the run into one table; returns the
/// aggregation and the table's path.
pub fn route_metrics(config: &RunConfig) -> Result<(Aggregation, PathBuf)> {
    let results = config.result_paths();
    results.create_dirs()?;

    let routes_dir = config.run_paths().routes_dir;
    let aggregation = aggregate(&routes_dir, &config.criterion)
        .with_context(|| format!("cannot read route artifacts in {}", routes_dir.display()))?;

    let table = results.table_file(config.output_format);
    write_table(config.output_format, &table, &aggregation.rows)?;
    Ok((aggregation, table))
}
