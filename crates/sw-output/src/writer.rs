//! The `TableWriter` trait implemented by all backend writers.

use crate::{OutputResult, RouteSummaryRow};

/// Trait implemented by the CSV and Parquet writers.
pub trait TableWriter {
    /// Append a batch of rows.
    fn write_rows(&mut self, rows: &[RouteSummaryRow]) -> OutputResult<()>;

    /// Flush and close the underlying file.
    ///
    /// Idempotent; later calls do nothing.
    fn finish(&mut self) -> OutputResult<()>;
}
