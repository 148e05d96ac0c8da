//! CSV output backend.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::row::COLUMNS;
use crate::writer::TableWriter;
use crate::{OutputResult, RouteSummaryRow};

/// Writes the route table to one CSV file.
pub struct CsvTableWriter {
    writer:   Writer<File>,
    finished: bool,
}

impl CsvTableWriter {
    /// Create (or truncate) the file at `path` and write the header row.
    pub fn new(path: &Path) -> OutputResult<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(COLUMNS)?;
        Ok(Self { writer, finished: false })
    }
}

impl TableWriter for CsvTableWriter {
    fn write_rows(&mut self, rows: &[RouteSummaryRow]) -> OutputResult<()> {
        for row in rows {
            self.writer.write_record(&[
                row.source.clone(),
                row.pair_id.to_string(),
                row.time_of_day.clone(),
                row.preference.clone(),
                row.value.to_string(),
                row.distance.to_string(),
                row.amount.to_string(),
                row.exposure.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}
