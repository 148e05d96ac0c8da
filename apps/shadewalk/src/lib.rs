//! `shadewalk`: the command-line face of the pipeline.
//!
//! | Binary          | Reads                          | Writes                                   |
//! |-----------------|--------------------------------|------------------------------------------|
//! | `sample_pairs`  | config, study area GeoJSON     | `02_interim/od_pairs.csv`, `config.yml`  |
//! | `fetch_routes`  | `02_interim/od_pairs.csv`      | `01_raw/01_routes/*.geojson`, failures   |
//! | `route_metrics` | `01_raw/01_routes/*.geojson`   | `03_final/all.{parquet,csv}`             |
//!
//! Every binary takes `--config <path>` and nothing else.  The stage logic
//! lives in [`stages`] so it can be driven without a process boundary.

pub mod cli;
pub mod log;
pub mod stages;

#[cfg(test)]
mod tests;
