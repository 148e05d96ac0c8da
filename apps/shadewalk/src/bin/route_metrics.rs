//! `route_metrics`: aggregate the fetched route artifacts into one table.
//!
//! Run with:
//!   cargo run -p shadewalk --bin route_metrics -- --config config.yml

use anyhow::Result;

use shadewalk::cli::Args;
use shadewalk::stages;

fn main() -> Result<()> {
    let args = Args::parse_for("Aggregate route artifacts into a route metrics table");
    let config = args.load_config()?;

    let results = config.result_paths();
    results.create_dirs()?;
    shadewalk::log::init(config.log_level.as_deref(), Some(&results.output_dir.join("shadewalk.log")))?;

    let (aggregation, table) = stages::route_metrics(&config)?;
    log::info!(
        "{} rows from {} routes written to {}",
        aggregation.rows.len(),
        aggregation.routes,
        table.display()
    );
    Ok(())
}
