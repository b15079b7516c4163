//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The value stored in a cell, and its classification
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`Dimension`] - The occupied extent of a written sheet

mod address;
mod dimension;
mod value;

pub use address::CellAddress;
pub use dimension::Dimension;
pub use value::{
    decode_excel_escapes, escape_text, CellValue, EncodedCell, TypeTag, DATE_STYLE_INDEX,
};
