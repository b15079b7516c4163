//! In-memory data table: named columns and rows of typed cells

use crate::cell::CellValue;
use crate::error::{Error, Result};

/// A table with named columns and uniformly sized rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl DataTable {
    /// Create an empty table with no columns
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with the given columns
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a column; existing rows get an empty cell for it
    pub fn add_column<S: Into<String>>(&mut self, name: S) -> &mut Self {
        self.columns.push(name.into());
        for row in &mut self.rows {
            row.push(CellValue::Empty);
        }
        self
    }

    /// Append a row
    ///
    /// Fails if the row's width differs from the number of columns.
    pub fn add_row<I, V>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let row: Vec<CellValue> = values.into_iter().map(Into::into).collect();
        if row.len() != self.columns.len() {
            return Err(Error::Configuration(format!(
                "row has {} values but the table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(self)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get a cell by 0-based row index and column name
    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(col)
    }
}
