//! Data-layer error types.

use thiserror::Error;

/// Errors that can occur while loading, validating, or exporting panel data.
#[derive(Debug, Error)]
pub enum DataError {
    /// A required file was not found on disk.
    #[error("File not found: {0} ({1})")]
    FileNotFound(String, String),

    /// Parquet parsing or decoding failed.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A required column is missing.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A column has an unexpected data type.
    #[error("Invalid column type: {0}")]
    InvalidColumnType(String),

    /// No usable rows were produced by a fetch or load.
    #[error("Empty data")]
    EmptyData,

    /// Data violated a panel invariant.
    #[error("Corrupt data: {0}")]
    CorruptData(String),

    /// Writing an export artifact failed.
    #[error("Write error: {0}")]
    WriteError(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
