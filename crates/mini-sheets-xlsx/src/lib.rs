//! # mini-sheets-xlsx
//!
//! XLSX (Office Open XML) package writer and streaming reader for mini-sheets.
//!
//! Writing turns a [`SheetSource`] into a single-sheet package; reading pulls
//! rows from a package one `<row>` element at a time.

pub mod error;
pub mod options;
pub mod package;
pub mod reader;
pub mod writer;

pub use error::{XlsxError, XlsxResult};
pub use options::{ReadOptions, TextEncoding, WriteOptions};
pub use package::{Package, PackagePart};
pub use reader::{QueryExt, Records, RowStream, XlsxReader};
pub use writer::{SheetSource, WorksheetXml, XlsxWriter};
