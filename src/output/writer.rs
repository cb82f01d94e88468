//! Parquet file writer
//!
//! Writes tables produced by the service to Parquet files.

use crate::error::{Error, Result};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;

/// Write one table to a Snappy-compressed Parquet file
///
/// Returns the number of rows written. Tables without columns cannot be
/// represented in Parquet and are rejected.
pub fn write_table_to_parquet(path: impl AsRef<Path>, batch: &RecordBatch) -> Result<usize> {
    if batch.num_columns() == 0 {
        return Err(Error::output(format!(
            "Table for {} has no columns",
            path.as_ref().display()
        )));
    }

    let file = File::create(path.as_ref()).map_err(|e| Error::Output {
        message: format!("Failed to create file: {e}"),
    })?;

    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props)).map_err(|e| {
        Error::Output {
            message: format!("Failed to create Parquet writer: {e}"),
        }
    })?;

    writer.write(batch).map_err(|e| Error::Output {
        message: format!("Failed to write batch: {e}"),
    })?;
    writer.close().map_err(|e| Error::Output {
        message: format!("Failed to close Parquet writer: {e}"),
    })?;

    Ok(batch.num_rows())
}
