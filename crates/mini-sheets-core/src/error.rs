//! Error types for mini-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mini-sheets-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Row index out of bounds
    #[error("Row index out of bounds: {0} (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index out of bounds: {0} (max: {1})")]
    ColumnOutOfBounds(u32, u32),

    /// A tabular source has no usable columns, or its rows disagree with them
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Text does not satisfy the format of its target type
    #[error("'{value}' is not a valid {target}")]
    Format {
        value: String,
        target: &'static str,
    },

    /// Text cannot be converted to its target type
    #[error("'{value}' can't cast to {target}")]
    Cast {
        value: String,
        target: &'static str,
    },

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    pub(crate) fn cast<S: Into<String>>(value: S, target: &'static str) -> Self {
        Error::Cast {
            value: value.into(),
            target,
        }
    }
}
