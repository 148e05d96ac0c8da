//! Parquet output backend (feature `parquet`).

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Builder, StringBuilder, UInt32Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::TableWriter;
use crate::{OutputResult, RouteSummaryRow};

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("source",      DataType::Utf8,    false),
        Field::new("pair_id",     DataType::UInt32,  false),
        Field::new("time_of_day", DataType::Utf8,    false),
        Field::new("preference",  DataType::Utf8,    false),
        Field::new("value",       DataType::Float64, false),
        Field::new("distance",    DataType::Float64, false),
        Field::new("amount",      DataType::Float64, false),
        Field::new("exposure",    DataType::Float64, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes the route table to one Parquet file.
///
/// `finish()` **must** be called to write the Parquet footer; a file written
/// without it cannot be opened by Parquet readers.
pub struct ParquetTableWriter {
    writer: Option<ArrowWriter<File>>,
    schema: Arc<Schema>,
}

impl ParquetTableWriter {
    /// Create (or truncate) the Parquet file at `path`.
    pub fn new(path: &Path) -> OutputResult<Self> {
        let schema = summary_schema();
        let file = File::create(path)?;
        let writer = ArrowWriter::try_new(file, Arc::clone(&schema), Some(snappy_props()))?;
        Ok(Self { writer: Some(writer), schema })
    }
}

impl TableWriter for ParquetTableWriter {
    fn write_rows(&mut self, rows: &[RouteSummaryRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };

        let mut sources      = StringBuilder::new();
        let mut pair_ids     = UInt32Builder::new();
        let mut times        = StringBuilder::new();
        let mut preferences  = StringBuilder::new();
        let mut values       = Float64Builder::new();
        let mut distances    = Float64Builder::new();
        let mut amounts      = Float64Builder::new();
        let mut exposures    = Float64Builder::new();

        for row in rows {
            sources.append_value(&row.source);
            pair_ids.append_value(row.pair_id);
            times.append_value(&row.time_of_day);
            preferences.append_value(&row.preference);
            values.append_value(row.value);
            distances.append_value(row.distance);
            amounts.append_value(row.amount);
            exposures.append_value(row.exposure);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.schema),
            vec![
                Arc::new(sources.finish()),
                Arc::new(pair_ids.finish()),
                Arc::new(times.finish()),
                Arc::new(preferences.finish()),
                Arc::new(values.finish()),
                Arc::new(distances.finish()),
                Arc::new(amounts.finish()),
                Arc::new(exposures.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.writer.take() {
            w.close()?;
        }
        Ok(())
    }
}
