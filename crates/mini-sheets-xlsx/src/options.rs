//! XLSX options

use mini_sheets_core::CellAddress;

/// UTF-8 byte-order mark
pub(crate) const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text encoding applied to every archive entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding {
    /// Prefix each entry with a UTF-8 byte-order mark (default: true)
    pub byte_order_mark: bool,
}

impl TextEncoding {
    /// UTF-8 without a byte-order mark
    pub fn utf8() -> Self {
        Self {
            byte_order_mark: false,
        }
    }

    /// UTF-8 with a byte-order mark
    pub fn utf8_with_bom() -> Self {
        Self {
            byte_order_mark: true,
        }
    }

    pub(crate) fn preamble(&self) -> &'static [u8] {
        if self.byte_order_mark {
            UTF8_BOM
        } else {
            &[]
        }
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::utf8_with_bom()
    }
}

/// Options for writing XLSX packages
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Top-left cell of the written grid (default: A1)
    pub start_cell: CellAddress,
    /// Write a header row of column names (default: true)
    pub print_header: bool,
    /// Entry text encoding
    pub encoding: TextEncoding,
}

impl WriteOptions {
    /// Start writing at `reference` (e.g. `"B3"`)
    pub fn starting_at(reference: &str) -> mini_sheets_core::Result<Self> {
        Ok(Self {
            start_cell: CellAddress::parse(reference)?,
            ..Self::default()
        })
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            start_cell: CellAddress::default(),
            print_header: true,
            encoding: TextEncoding::default(),
        }
    }
}

/// Options for reading XLSX packages
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Use the first row as keys for the rows after it (default: false)
    pub use_header_row: bool,
}

impl ReadOptions {
    pub fn with_header_row() -> Self {
        Self {
            use_header_row: true,
        }
    }
}
