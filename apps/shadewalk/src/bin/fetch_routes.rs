//! `fetch_routes`: request a walking route for every OD pair, time of day and
//! preference from the configured routing API.
//!
//! Run with:
//!   cargo run -p shadewalk --bin fetch_routes -- --config config.yml

use anyhow::{Context, Result};

use shadewalk::cli::Args;
use shadewalk::stages;
use sw_fetch::OrsClient;

fn main() -> Result<()> {
    let args = Args::parse_for("Fetch routes for the sampled OD pairs from the routing API");
    let config = args.load_config()?;

    let paths = config.run_paths();
    paths.create_dirs()?;
    shadewalk::log::init(config.log_level.as_deref(), Some(&paths.log_file()))?;

    let client = OrsClient::new(&config.ors_url, config.ors_api_key.clone(), config.request_timeout())
        .context("cannot build the routing API client")?;
    let report = stages::fetch_routes(&config, &client)?;

    if report.budget_exhausted {
        log::warn!("request budget exhausted; {} combinations were not requested", report.not_attempted);
    }
    Ok(())
}
