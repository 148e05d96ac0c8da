//! Command-line arguments common to every stage.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser};
use sw_core::RunConfig;

#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// Path to the run's YAML config file.
    #[arg(long, short)]
    pub config: PathBuf,
}

impl Args {
    /// Parse the process arguments, describing the binary as `about`.
    pub fn parse_for(about: &'static str) -> Self {
        let matches = Self::command().about(about).get_matches();
        Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    pub fn load_config(&self) -> Result<RunConfig> {
        RunConfig::load(&self.config)
            .with_context(|| format!("cannot load config {}", self.config.display()))
    }
}
