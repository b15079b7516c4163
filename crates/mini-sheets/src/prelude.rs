//! Prelude module - common imports for mini-sheets users
//!
//! ```rust
//! use mini_sheets::prelude::*;
//! ```

pub use crate::{
    impl_record,
    // Cell types
    CellAddress,
    CellValue,
    DataTable,
    // Error types
    Error,
    // Record shapes
    Field,
    FieldType,
    // Extension traits
    QueryExt,
    RawRow,
    ReadOptions,
    Record,
    Result,
    SheetSource,
    SheetSourceExt,
    WriteOptions,
    XlsxError,
    // I/O types
    XlsxReader,
    XlsxResult,
    XlsxWriter,
};
