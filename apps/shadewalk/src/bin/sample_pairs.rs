//! `sample_pairs`: sample random OD pairs inside the study area.
//!
//! Run with:
//!   cargo run -p shadewalk --bin sample_pairs -- --config config.yml

use anyhow::Result;

use shadewalk::cli::Args;
use shadewalk::stages;

fn main() -> Result<()> {
    let args = Args::parse_for("Sample random origin-destination pairs inside the study area");
    let config = args.load_config()?;

    let paths = config.run_paths();
    paths.create_dirs()?;
    shadewalk::log::init(config.log_level.as_deref(), Some(&paths.log_file()))?;

    stages::sample_pairs(&config, &args.config)?;
    Ok(())
}
