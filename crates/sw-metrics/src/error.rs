//! Metrics-subsystem error type.

use thiserror::Error;

/// Errors produced by `sw-metrics`.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// The route has no extra-info block for the requested criterion.
    #[error("route has no summary for criterion '{0}'")]
    UnknownCriterion(String),

    #[error("malformed route artifact: {0}")]
    Malformed(String),

    #[error("a line needs at least two points, got {0}")]
    ShortLine(usize),

    #[error("projection error: {0}")]
    Projection(#[from] proj4rs::errors::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] sw_core::CoreError),

    #[error(transparent)]
    Output(#[from] sw_output::OutputError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MetricsResult<T> = Result<T, MetricsError>;
