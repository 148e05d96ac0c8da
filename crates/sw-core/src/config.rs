//! Run configuration, loaded from a YAML file.
//!
//! # Example
//!
//! ```yaml
//! output_dir: ./output
//! run_name: heidelberg_summer
//! ors_url: http://localhost:8080/ors
//! times_of_day: [morning, noon, evening]
//! preferences: [recommended, shortest]
//! n_pairs: 100
//! aoi: ../geodata/hd.geojson
//! n_points: 400
//! seed: 7
//! request_budget: 500
//! ```
//!
//! Every stage loads the same file and fails before doing any network or
//! file work if a required key is missing or a value is unusable.  Relative
//! `aoi` paths resolve against the directory that holds the config file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::paths::{ResultPaths, RunPaths};
use crate::{CoreError, CoreResult};

/// How sampled candidates are turned into OD pairs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairingMode {
    /// Shuffle the candidates and draw `n_pairs` disjoint pairs.
    #[default]
    Disjoint,
    /// First-200 / last-100 slicing of the candidate list.
    Legacy,
}

/// File format of the aggregated route table.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Parquet,
    Csv,
}

impl OutputFormat {
    /// File extension (without the dot) for this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Parquet => "parquet",
            OutputFormat::Csv => "csv",
        }
    }
}

/// Settings shared by all pipeline stages.
#[derive(Clone, Debug, Deserialize)]
pub struct RunConfig {
    /// Root directory for raw and interim outputs.
    pub output_dir: PathBuf,
    /// Root directory for the aggregated result; defaults to `output_dir`.
    #[serde(default)]
    pub output_dir_metrics: Option<PathBuf>,
    pub run_name: String,

    // ── Routing API ───────────────────────────────────────────────────────
    pub ors_url: String,
    #[serde(default)]
    pub ors_api_key: Option<String>,
    #[serde(default = "default_profile")]
    pub profile: String,
    pub times_of_day: Vec<String>,
    #[serde(default = "default_preferences")]
    pub preferences: Vec<String>,
    /// OD pairs requested per time-of-day.
    pub n_pairs: usize,
    #[serde(default)]
    pub request_budget: Option<usize>,
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Routing extra used for the weighting and for aggregation.
    #[serde(default = "default_criterion")]
    pub criterion: String,
    #[serde(default = "default_csv_factor")]
    pub csv_factor: f64,

    // ── Sampling ──────────────────────────────────────────────────────────
    /// Area-of-interest boundary (GeoJSON).
    pub aoi: PathBuf,
    pub n_points: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub pairing: PairingMode,

    // ── Output ────────────────────────────────────────────────────────────
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default)]
    pub log_level: Option<String>,
}

fn default_profile() -> String {
    "foot-walking".to_string()
}

fn default_preferences() -> Vec<String> {
    vec!["recommended".to_string()]
}

fn default_request_delay_ms() -> u64 {
    1_000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_criterion() -> String {
    "csv".to_string()
}

fn default_csv_factor() -> f64 {
    1.0
}

impl RunConfig {
    /// Read, parse and validate the config file at `path`.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.is_file() {
            return Err(CoreError::ConfigNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let mut config: RunConfig = serde_yaml::from_str(&text).map_err(|source| CoreError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;

        if config.aoi.is_relative() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            config.aoi = base.join(&config.aoi);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a config from YAML text without touching the file system.
    pub fn from_yaml_str(text: &str) -> CoreResult<Self> {
        let config: RunConfig = serde_yaml::from_str(text).map_err(|source| CoreError::Yaml {
            path: PathBuf::from("<string>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialization alone cannot catch.
    pub fn validate(&self) -> CoreResult<()> {
        if self.run_name.trim().is_empty() {
            return Err(CoreError::Config("run_name must not be empty".into()));
        }
        if self.ors_url.trim().is_empty() {
            return Err(CoreError::Config("ors_url must not be empty".into()));
        }
        if self.n_pairs == 0 {
            return Err(CoreError::Config("n_pairs must be at least 1".into()));
        }
        if self.n_points == 0 {
            return Err(CoreError::Config("n_points must be at least 1".into()));
        }
        if self.times_of_day.is_empty() {
            return Err(CoreError::Config("times_of_day must list at least one label".into()));
        }
        if self.preferences.is_empty() {
            return Err(CoreError::Config("preferences must list at least one label".into()));
        }
        for label in self.times_of_day.iter().chain(&self.preferences) {
            validate_label(label)?;
        }
        if !self.csv_factor.is_finite() {
            return Err(CoreError::Config("csv_factor must be a finite number".into()));
        }
        Ok(())
    }

    /// Directory layout for raw and interim outputs of this run.
    pub fn run_paths(&self) -> RunPaths {
        RunPaths::new(&self.output_dir, &self.run_name)
    }

    /// Directory layout for the aggregated result of this run.
    pub fn result_paths(&self) -> ResultPaths {
        let root = self.output_dir_metrics.as_deref().unwrap_or(&self.output_dir);
        ResultPaths::new(root, &self.run_name)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Time-of-day and preference labels are embedded in `_`-separated artifact
/// names, so they must be non-empty and free of `_` and path separators.
fn validate_label(label: &str) -> CoreResult<()> {
    if label.is_empty() {
        return Err(CoreError::Config("labels must not be empty".into()));
    }
    if let Some(bad) = label.chars().find(|c| matches!(c, '_' | '/' | '\\') || c.is_whitespace()) {
        return Err(CoreError::Config(format!(
            "label {label:?} contains {bad:?}; labels may not contain '_', path separators or whitespace"
        )));
    }
    Ok(())
}
