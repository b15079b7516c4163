//! Cell address codec

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "A1", "AB12")
///
/// Both coordinates are 1-based: column 1 is `A`, row 1 is the first row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// Column index (1-based, A=1, B=2, ..., Z=26, AA=27)
    pub col: u32,
    /// Row index (1-based)
    pub row: u32,
}

impl CellAddress {
    /// Create a new cell address from 1-based coordinates
    ///
    /// Fails if either coordinate is zero or past the worksheet limits.
    pub fn new(col: u32, row: u32) -> Result<Self> {
        if col == 0 || row == 0 {
            return Err(Error::InvalidAddress(format!(
                "coordinates must be >= 1, got column {} row {}",
                col, row
            )));
        }
        if row > MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS));
        }
        if col > MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS));
        }
        Ok(Self { col, row })
    }

    /// Parse a cell address from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use mini_sheets_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("AB12").unwrap();
    /// assert_eq!(addr.col, 28);
    /// assert_eq!(addr.row, 12);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let split = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());

        if split == 0 {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }

        let col = Self::letters_to_column(&s[..split])?;

        let row_str = &s[split..];
        if row_str.is_empty() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }
        if !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!(
                "invalid row number in '{}'",
                s
            )));
        }

        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;

        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        if row > MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS));
        }

        Ok(Self { col, row })
    }

    /// Convert a 1-based column index to letters (1 = A, 26 = Z, 27 = AA, etc.)
    ///
    /// There is no letter for zero; column 0 yields an empty string.
    pub fn column_to_letters(col: u32) -> String {
        let mut letters = Vec::new();
        let mut n = col;

        while n > 0 {
            n -= 1;
            letters.push((n % 26) as u8 + b'A');
            n /= 26;
        }

        letters.iter().rev().map(|&b| b as char).collect()
    }

    /// Same conversion as [`column_to_letters`](Self::column_to_letters), for a
    /// 0-based column index (0 = A, 25 = Z, 26 = AA)
    ///
    /// Used where only a column count is known, e.g. `count - 1` for the last
    /// populated column.
    pub fn alphabet_column_name(index: u32) -> String {
        Self::column_to_letters(index + 1)
    }

    /// Convert column letters to a 1-based index (A = 1, Z = 26, AA = 27, etc.)
    ///
    /// Columns past `XFD` fail with [`Error::ColumnOutOfBounds`].
    pub fn letters_to_column(letters: &str) -> Result<u32> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
            col = col.saturating_mul(26).saturating_add(digit);
        }

        if col > MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS));
        }

        Ok(col)
    }

    /// Format as A1-style string
    pub fn to_reference(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row)
    }

    /// The address one column to the right
    pub fn next_col(&self) -> Self {
        Self {
            col: self.col.saturating_add(1),
            row: self.row,
        }
    }
}

impl Default for CellAddress {
    fn default() -> Self {
        Self { col: 1, row: 1 }
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_reference())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
