//! Parquet serialization of normalized records.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow_array::{ArrayRef, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema, SchemaRef};
use newsfeed_core::{NewsRecord, RECORD_COLUMNS};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::error::WriteError;

/// Arrow schema of the record file: eight non-null UTF-8 columns in
/// [`RECORD_COLUMNS`] order.
#[must_use]
pub fn record_schema() -> SchemaRef {
    let fields: Vec<Field> = RECORD_COLUMNS
        .iter()
        .map(|name| Field::new(*name, DataType::Utf8, false))
        .collect();
    Arc::new(Schema::new(fields))
}

/// Writes `records` to a Parquet file at `path` and returns the path.
///
/// Parent directories are created as needed. The record set becomes a single
/// Snappy-compressed row group.
///
/// # Errors
///
/// - [`WriteError::Io`] if the directory or file cannot be created.
/// - [`WriteError::Arrow`] / [`WriteError::Parquet`] on serialization failure.
/// - [`WriteError::NotCreated`] if no file exists at `path` afterwards.
pub fn write_records(records: &[NewsRecord], path: &Path) -> Result<PathBuf, WriteError> {
    tracing::info!(rows = records.len(), path = %path.display(), "writing parquet file");

    match write_parquet(records, path) {
        Ok(bytes) => {
            tracing::info!(path = %path.display(), bytes, "saved parquet file");
            Ok(path.to_path_buf())
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to write parquet file");
            Err(e)
        }
    }
}

/// Does the actual write and returns the size of the file on disk.
fn write_parquet(records: &[NewsRecord], path: &Path) -> Result<u64, WriteError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| WriteError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let batch = to_record_batch(records)?;

    let file = File::create(path).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(meta.len()),
        _ => Err(WriteError::NotCreated {
            path: path.to_path_buf(),
        }),
    }
}

fn to_record_batch(records: &[NewsRecord]) -> Result<RecordBatch, WriteError> {
    let columns: Vec<ArrayRef> = vec![
        string_column(records.iter().map(|r| r.news_title.as_str())),
        string_column(records.iter().map(|r| r.timestamp.as_str())),
        string_column(records.iter().map(|r| r.url_source.as_str())),
        string_column(records.iter().map(|r| r.content.as_str())),
        string_column(records.iter().map(|r| r.source.as_str())),
        string_column(records.iter().map(|r| r.author.as_str())),
        string_column(records.iter().map(|r| r.url_to_image.as_str())),
        string_column(records.iter().map(|r| r.processed_at.as_str())),
    ];
    Ok(RecordBatch::try_new(record_schema(), columns)?)
}

fn string_column<'a>(values: impl Iterator<Item = &'a str>) -> ArrayRef {
    Arc::new(StringArray::from_iter_values(values))
}
