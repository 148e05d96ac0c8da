//! Output directory layout of a run.
//!
//! ```text
//! <output_dir>/<run_name>/
//!     config.yml
//!     shadewalk.log
//!     01_raw/01_routes/          one artifact per routing request
//!     01_raw/failed_requests.csv
//!     02_interim/od_pairs.csv
//!     03_final/
//! <output_dir_metrics>/<run_name>/03_final/all.parquet
//! ```

use std::path::{Path, PathBuf};

use crate::config::OutputFormat;
use crate::CoreResult;

/// Paths for raw and interim outputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunPaths {
    pub output_dir:  PathBuf,
    pub raw_dir:     PathBuf,
    pub interim_dir: PathBuf,
    pub final_dir:   PathBuf,
    pub routes_dir:  PathBuf,
}

impl RunPaths {
    pub fn new(output_dir: &Path, run_name: &str) -> Self {
        let output_dir = output_dir.join(run_name);
        let raw_dir = output_dir.join("01_raw");
        let interim_dir = output_dir.join("02_interim");
        let final_dir = output_dir.join("03_final");
        let routes_dir = raw_dir.join("01_routes");
        Self { output_dir, raw_dir, interim_dir, final_dir, routes_dir }
    }

    /// Create every directory of the layout.  Existing directories are fine.
    pub fn create_dirs(&self) -> CoreResult<()> {
        for dir in [&self.output_dir, &self.raw_dir, &self.interim_dir, &self.final_dir, &self.routes_dir] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Sampled OD pairs with their haversine distances.
    pub fn od_pairs_file(&self) -> PathBuf {
        self.interim_dir.join("od_pairs.csv")
    }

    /// Requests that failed during the fetch stage.
    pub fn failures_file(&self) -> PathBuf {
        self.raw_dir.join("failed_requests.csv")
    }

    /// Copy of the config the run was started with.
    pub fn config_copy(&self) -> PathBuf {
        self.output_dir.join("config.yml")
    }

    pub fn log_file(&self) -> PathBuf {
        self.output_dir.join("shadewalk.log")
    }
}

/// Paths for the aggregated route metrics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultPaths {
    pub output_dir: PathBuf,
    pub final_dir:  PathBuf,
}

impl ResultPaths {
    pub fn new(output_dir: &Path, run_name: &str) -> Self {
        let output_dir = output_dir.join(run_name);
        let final_dir = output_dir.join("03_final");
        Self { output_dir, final_dir }
    }

    pub fn create_dirs(&self) -> CoreResult<()> {
        std::fs::create_dir_all(&self.final_dir)?;
        Ok(())
    }

    /// The single combined table written by the aggregation stage.
    pub fn table_file(&self, format: OutputFormat) -> PathBuf {
        self.final_dir.join(format!("all.{}", format.extension()))
    }
}
