//! XLSX error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur during XLSX reading/writing
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Invalid file format
    #[error("Invalid XLSX format: {0}")]
    InvalidFormat(String),

    /// Missing required part
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Destination already exists on a create-new write
    #[error("File already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// A single-row query found no rows
    #[error("Sequence contains no rows")]
    EmptySequence,

    /// A single-row query found more than one row
    #[error("Sequence contains more than one row")]
    MoreThanOneRow,

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] mini_sheets_core::Error),
}
