//! `sw-output`: table writers for aggregated route metrics.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend     | File created   |
//! |-----------|-------------|----------------|
//! | *(none)*  | CSV         | `all.csv`      |
//! | `parquet` | Parquet     | `all.parquet`  |
//!
//! `parquet` is on by default.  Both backends implement [`TableWriter`];
//! [`open_table_writer`] picks one from the configured [`OutputFormat`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use sw_output::open_table_writer;
//!
//! let mut writer = open_table_writer(OutputFormat::Parquet, &path)?;
//! writer.write_rows(&rows)?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod writer;

#[cfg(feature = "parquet")]
pub mod parquet;


use std::path::Path;

use sw_core::OutputFormat;

pub use crate::csv::CsvTableWriter;
pub use error::{OutputError, OutputResult};
pub use row::RouteSummaryRow;
pub use writer::TableWriter;

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetTableWriter;

/// Create the writer for `format` at `path`.
pub fn open_table_writer(format: OutputFormat, path: &Path) -> OutputResult<Box<dyn TableWriter>> {
    match format {
        OutputFormat::Csv => Ok(Box::new(CsvTableWriter::new(path)?)),
        #[cfg(feature = "parquet")]
        OutputFormat::Parquet => Ok(Box::new(ParquetTableWriter::new(path)?)),
        #[cfg(not(feature = "parquet"))]
        OutputFormat::Parquet => Err(OutputError::FormatUnavailable("parquet")),
    }
}
