use crate::types::table::Table;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to read metadata for '{0}'")]
    MetadataRead(PathBuf, #[source] std::io::Error),

    // Errors during parquet writing (inside blocking task)
    #[error("I/O error writing parquet cache file '{0}'")]
    ParquetWriteIo(PathBuf, #[source] std::io::Error),
    #[error("Encoding error writing parquet cache file '{0}'")]
    ParquetWritePolars(PathBuf, #[source] PolarsError),

    #[error("Failed to scan parquet cache file '{0}'")]
    ParquetScan(PathBuf, #[source] PolarsError),

    #[error("Parsing error reading {table} CSV data from '{path}'")]
    CsvRead {
        table: Table,
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Missing required column '{column}' in {table} data")]
    MissingColumn { table: Table, column: String },

    #[error("Failed to cast column '{column}' of {table} data: {source}")]
    ColumnCast {
        table: Table,
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Unexpected data state in {table} data: {message}")]
    UnexpectedData { table: Table, message: String },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
