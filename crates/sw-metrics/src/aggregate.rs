//! Directory-wide aggregation into one table.

use std::path::{Path, PathBuf};

use log::{info, warn};
use sw_core::{ARTIFACT_EXTENSION, OutputFormat};
use sw_output::{RouteSummaryRow, open_table_writer};

use crate::{MetricsResult, Route};

/// An artifact that contributed no rows.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedRoute {
    pub path:   PathBuf,
    pub reason: String,
}

/// Rows of every readable artifact plus the ones that were skipped.
#[derive(Clone, Debug, Default)]
pub struct Aggregation {
    pub rows:    Vec<RouteSummaryRow>,
    /// Artifacts that contributed rows.
    pub routes:  usize,
    pub skipped: Vec<SkippedRoute>,
}

/// Route artifacts in `dir`, sorted by file name.
pub fn list_artifacts(dir: &Path) -> MetricsResult<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_artifact = path.is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(ARTIFACT_EXTENSION);
        if is_artifact {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Summarise `criterion` for every artifact in `routes_dir`.
///
/// Only an unreadable directory is an error.  A single artifact that cannot
/// be read, parsed, named, or lacks the criterion is logged and skipped.
pub fn aggregate(routes_dir: &Path, criterion: &str) -> MetricsResult<Aggregation> {
    let paths = list_artifacts(routes_dir)?;
    info!("aggregating '{criterion}' over {} route artifacts in {}", paths.len(), routes_dir.display());

    let mut out = Aggregation::default();
    for path in paths {
        match Route::load(&path).and_then(|route| route.summary_rows(criterion)) {
            Ok(rows) => {
                out.rows.extend(rows);
                out.routes += 1;
            }
            Err(e) => {
                warn!("skipping {}: {e}", path.display());
                out.skipped.push(SkippedRoute { path, reason: e.to_string() });
            }
        }
    }

    info!("{} rows from {} routes, {} skipped", out.rows.len(), out.routes, out.skipped.len());
    Ok(out)
}

/// Write `rows` to `path` in one pass.
pub fn write_table(format: OutputFormat, path: &Path, rows: &[RouteSummaryRow]) -> MetricsResult<()> {
    let mut writer = open_table_writer(format, path)?;
    writer.write_rows(rows)?;
    writer.finish()?;
    info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
