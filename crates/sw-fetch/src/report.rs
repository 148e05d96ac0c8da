//! Outcome of a fetch run and the failure log.
//!
//! # Failure CSV
//!
//! ```csv
//! pair_id,time_of_day,preference,message
//! 17,noon,recommended,routing API returned status 404: ...
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use sw_core::{ArtifactKey, PairId};

use crate::FetchResult;

/// A request that did not produce an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub pair_id:     PairId,
    pub time_of_day: String,
    pub preference:  String,
    pub message:     String,
}

impl FetchFailure {
    pub fn new(key: &ArtifactKey, message: String) -> Self {
        Self {
            pair_id:     key.pair_id,
            time_of_day: key.time_of_day.clone(),
            preference:  key.preference.clone(),
            message,
        }
    }
}

/// Summary of one [`fetch_routes`](crate::fetch_routes) run.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// Requests issued, successful or not.
    pub attempts:         usize,
    /// Artifacts written, in request order.
    pub written:          Vec<PathBuf>,
    pub failures:         Vec<FetchFailure>,
    /// Combinations never requested because the budget ran out.
    pub not_attempted:    usize,
    pub budget_exhausted: bool,
}

impl FetchReport {
    pub fn succeeded(&self) -> usize {
        self.written.len()
    }
}

/// Column order of the failure CSV; matches the field order of
/// [`FetchFailure`].
pub const FAILURE_COLUMNS: [&str; 4] = ["pair_id", "time_of_day", "preference", "message"];

/// Write `failures` to `path` as CSV.  An empty list still writes the header.
pub fn write_failures_csv(path: &Path, failures: &[FetchFailure]) -> FetchResult<()> {
    // Header written explicitly: serde only emits one with the first record.
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(FAILURE_COLUMNS)?;
    for failure in failures {
        writer.serialize(failure)?;
    }
    writer.flush()?;
    Ok(())
}
