//! # mini-sheets
//!
//! Write tabular data to a single-sheet XLSX package and read it back as
//! header-keyed rows or typed records.
//!
//! ## Features
//!
//! - Write a [`DataTable`] or any slice of [`Record`] structs
//! - Stream rows back lazily, one `<row>` element at a time
//! - Map rows onto records, with date serials, identifiers and booleans
//!   coerced from cell text
//!
//! ## Example
//!
//! ```rust
//! use mini_sheets::prelude::*;
//! use std::io::Cursor;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Item {
//!     name: String,
//!     qty: i64,
//! }
//!
//! impl_record!(Item { name, qty });
//!
//! let items = vec![Item { name: "apple".into(), qty: 3 }];
//!
//! let buf = XlsxWriter::write(&items, Cursor::new(Vec::new()), &WriteOptions::default())
//!     .unwrap()
//!     .into_inner();
//!
//! let mut reader = XlsxReader::open(Cursor::new(buf)).unwrap();
//! let back = reader.records::<Item>().unwrap().single().unwrap();
//! assert_eq!(back, items[0]);
//! ```

pub mod prelude;

// Re-export core types
pub use mini_sheets_core::{
    impl_record,
    map_row,
    CellAddress,
    // Cell types
    CellValue,
    DataTable,
    Dimension,
    EncodedCell,
    // Error types
    Error,
    Field,
    FieldType,
    RawRow,
    // Record shapes
    Record,
    Result,
    RowKeys,
    TypeTag,
};

// Re-export I/O types
pub use mini_sheets_xlsx::{
    Package, PackagePart, QueryExt, ReadOptions, Records, RowStream, SheetSource, TextEncoding,
    WriteOptions, XlsxError, XlsxReader, XlsxResult, XlsxWriter,
};

use std::path::Path;

/// Extension trait for sheet sources to add file output
pub trait SheetSourceExt: SheetSource {
    /// Save to a new `.xlsx` file with default options
    fn save_as<P: AsRef<Path>>(&self, path: P) -> XlsxResult<()> {
        self.save_as_with(path, &WriteOptions::default())
    }

    /// Save to a new `.xlsx` file
    ///
    /// Never overwrites: an existing file fails with
    /// [`XlsxError::AlreadyExists`].
    fn save_as_with<P: AsRef<Path>>(&self, path: P, options: &WriteOptions) -> XlsxResult<()> {
        let path = path.as_ref();
        check_extension(path)?;

        log::debug!("saving sheet to {}", path.display());
        XlsxWriter::write_file(self, path, options)
    }
}

impl<S: SheetSource + ?Sized> SheetSourceExt for S {}

/// Read every row of a file's first sheet
///
/// For large sheets prefer [`XlsxReader::rows`], which does not collect.
pub fn query_rows<P: AsRef<Path>>(path: P, options: &ReadOptions) -> XlsxResult<Vec<RawRow>> {
    let path = path.as_ref();
    check_extension(path)?;

    let mut reader = XlsxReader::open_file(path)?;
    let rows = reader.rows(options)?.collect();
    rows
}

/// Read every record of a file's first sheet, keyed by its header row
///
/// For large sheets prefer [`XlsxReader::records`], which does not collect.
pub fn query<T: Record, P: AsRef<Path>>(path: P) -> XlsxResult<Vec<T>> {
    let path = path.as_ref();
    check_extension(path)?;

    let mut reader = XlsxReader::open_file(path)?;
    let records = reader.records::<T>()?.collect();
    records
}

fn check_extension(path: &Path) -> XlsxResult<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("xlsx") | Some("xlsm") => Ok(()),
        _ => Err(XlsxError::InvalidFormat(format!(
            "Unsupported file format: {}",
            path.display()
        ))),
    }
}
