//! Sampling-subsystem error type.

use std::path::PathBuf;

use thiserror::Error;

use sw_core::PairId;

/// Errors produced by `sw-sampling`.
#[derive(Debug, Error)]
pub enum SamplingError {
    #[error("{path}: no Polygon or MultiPolygon geometry found")]
    NoPolygon { path: PathBuf },

    #[error("study area is empty or has no finite bounds")]
    EmptyArea,

    #[error(
        "{strategy} pairing needs at least {needed} candidate points but only {got} fell inside \
         the study area; increase n_points"
    )]
    NotEnoughCandidates {
        strategy: &'static str,
        needed:   usize,
        got:      usize,
    },

    #[error("{strategy} pairing asks for more pairs than can be numbered")]
    TooManyPairs { strategy: &'static str },

    #[error("pair {0} has identical origin and destination")]
    DegeneratePair(PairId),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SamplingResult<T> = Result<T, SamplingError>;
