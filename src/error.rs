//! Error types for the record store and export boundary.
//!
//! The parsing and aggregation core never fails; only I/O does.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// File system errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed CSV input or a failed CSV write
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook generation errors
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// No submission with the given id exists in the store
    #[error("submission not found: {0}")]
    NotFound(String),

    /// A submission with the given id already exists in the store
    #[error("duplicate submission id: {0}")]
    DuplicateId(String),
}

pub type Result<T> = std::result::Result<T, Error>;
