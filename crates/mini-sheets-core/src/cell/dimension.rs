//! Worksheet dimension reference

use super::CellAddress;
use crate::error::Error;
use crate::MAX_COLS;
use std::fmt;

/// Occupied extent of a generated worksheet
///
/// Always anchored at `A1`. `max_row` is the highest row written and
/// `max_col` the number of columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimension {
    pub max_row: u32,
    pub max_col: u32,
}

impl Dimension {
    pub fn new(max_row: u32, max_col: u32) -> Self {
        Self { max_row, max_col }
    }

    /// Format as the `ref` attribute of a `<dimension>` element
    ///
    /// - `A1` for an empty sheet
    /// - `A{row}` when exactly one column is populated
    /// - `A1:{col}{row}` otherwise
    pub fn to_reference(&self) -> String {
        if self.max_row == 0 || self.max_col == 0 {
            "A1".to_string()
        } else if self.max_col == 1 {
            format!("A{}", self.max_row)
        } else {
            format!(
                "A1:{}{}",
                CellAddress::alphabet_column_name(self.max_col - 1),
                self.max_row
            )
        }
    }

    /// Last column named by a dimension reference (`A1:C5` -> 3, `B7` -> 2)
    ///
    /// Columns past the worksheet limit clip to [`MAX_COLS`]. Returns `None`
    /// if the reference has no column letters.
    pub fn last_column(reference: &str) -> Option<u32> {
        let end = reference.rsplit(':').next()?.trim();
        let split = end
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(end.len());

        match CellAddress::letters_to_column(&end[..split]) {
            Ok(col) => Some(col),
            Err(Error::ColumnOutOfBounds(..)) => Some(MAX_COLS),
            Err(_) => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_reference())
    }
}
