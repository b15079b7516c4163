//! # mini-sheets-core
//!
//! Core data structures for the mini-sheets spreadsheet interchange library.
//!
//! This crate provides the types shared by the reader and writer:
//! - [`CellValue`] - Cell values and their type classification
//! - [`CellAddress`] and [`Dimension`] - Cell addressing
//! - [`DataTable`] - Named columns with rows of typed cells
//! - [`Record`] - Struct shapes that map to and from sheet rows
//! - [`RawRow`] - Header-keyed rows of raw cell text
//!
//! ## Example
//!
//! ```rust
//! use mini_sheets_core::{CellAddress, CellValue, TypeTag};
//!
//! let addr = CellAddress::parse("B3").unwrap();
//! assert_eq!((addr.col, addr.row), (2, 3));
//!
//! let cell = CellValue::from(true).classify();
//! assert_eq!(cell.tag, TypeTag::Boolean);
//! assert_eq!(cell.text, "1");
//! ```

pub mod cell;
pub mod date;
pub mod error;
pub mod mapper;
pub mod record;
pub mod row;
pub mod table;

// Re-exports for convenience
pub use cell::{CellAddress, CellValue, Dimension, EncodedCell, TypeTag};
pub use error::{Error, Result};
pub use mapper::map_row;
pub use record::{Field, FieldType, Record};
pub use row::{RawRow, RowKeys};
pub use table::DataTable;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u32 = 16_384;
