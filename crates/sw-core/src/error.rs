//! Pipeline-wide error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where they need to surface configuration or path failures.

use std::path::PathBuf;

use thiserror::Error;

/// The top-level error type for `sw-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration file does not exist: {0}")]
    ConfigNotFound(PathBuf),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("YAML parse error in {path}: {source}")]
    Yaml {
        path:   PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{0:?} is not a route artifact name (expected route_<pair>_<time>_<preference>)")]
    ArtifactName(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `sw-core`.
pub type CoreResult<T> = Result<T, CoreError>;
