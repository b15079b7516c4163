//! Worksheet serializer

use mini_sheets_core::cell::escape_text;
use mini_sheets_core::{
    CellAddress, CellValue, DataTable, Dimension, EncodedCell, Error, Record, TypeTag, MAX_ROWS,
};

use crate::error::XlsxResult;
use crate::options::WriteOptions;

/// A tabular source the worksheet serializer can walk one row at a time
pub trait SheetSource {
    /// Column names in order
    fn column_names(&self) -> mini_sheets_core::Result<Vec<&str>>;

    /// Rows in order, each with one value per column
    fn rows(&self) -> Box<dyn Iterator<Item = Vec<CellValue>> + '_>;
}

impl SheetSource for DataTable {
    fn column_names(&self) -> mini_sheets_core::Result<Vec<&str>> {
        Ok(self.columns().iter().map(String::as_str).collect())
    }

    fn rows(&self) -> Box<dyn Iterator<Item = Vec<CellValue>> + '_> {
        Box::new(DataTable::rows(self).iter().cloned())
    }
}

impl<T: Record> SheetSource for [T] {
    fn column_names(&self) -> mini_sheets_core::Result<Vec<&str>> {
        let fields = T::fields();
        if fields.is_empty() {
            return Err(Error::Configuration(format!(
                "record shape {} has no fields",
                std::any::type_name::<T>()
            )));
        }
        Ok(fields.iter().map(|f| f.name).collect())
    }

    fn rows(&self) -> Box<dyn Iterator<Item = Vec<CellValue>> + '_> {
        Box::new(
            self.iter()
                .map(|record| T::fields().iter().map(|f| f.value(record)).collect()),
        )
    }
}

impl<T: Record> SheetSource for Vec<T> {
    fn column_names(&self) -> mini_sheets_core::Result<Vec<&str>> {
        self.as_slice().column_names()
    }

    fn rows(&self) -> Box<dyn Iterator<Item = Vec<CellValue>> + '_> {
        self.as_slice().rows()
    }
}

/// Serialized worksheet part
#[derive(Debug, Clone, PartialEq)]
pub struct WorksheetXml {
    /// Complete worksheet document
    pub xml: String,
    /// Extent declared in the `<dimension>` element
    pub dimension: Dimension,
}

/// Serialize a source into worksheet XML
///
/// Rows are written from `options.start_cell`, preceded by a header row of
/// column names when `options.print_header` is set. Every value is written,
/// nulls included, so each row carries one cell per column.
///
/// Fails with a bounds error if a row or column would fall past the
/// worksheet limits.
pub fn serialize_worksheet<S>(source: &S, options: &WriteOptions) -> XlsxResult<WorksheetXml>
where
    S: SheetSource + ?Sized,
{
    let columns = source.column_names()?;
    let start = CellAddress::new(options.start_cell.col, options.start_cell.row)?;
    if let Some(extra) = columns.len().checked_sub(1) {
        let last_col = u32::try_from(extra)
            .ok()
            .and_then(|n| start.col.checked_add(n))
            .unwrap_or(u32::MAX);
        CellAddress::new(last_col, start.row)?;
    }

    let mut row_index = start.row;
    let mut data_rows = 0usize;
    let mut sheet_data = String::new();

    if options.print_header {
        let header = columns.iter().map(|name| EncodedCell {
            tag: TypeTag::Str,
            text: escape_text(name),
        });
        write_row(&mut sheet_data, start.col, row_index, header);
        row_index = next_row(row_index)?;
    }

    for values in source.rows() {
        if row_index > MAX_ROWS {
            return Err(Error::RowOutOfBounds(row_index, MAX_ROWS).into());
        }
        write_row(
            &mut sheet_data,
            start.col,
            row_index,
            values.iter().map(CellValue::classify),
        );
        row_index = next_row(row_index)?;
        data_rows += 1;
    }

    let dimension = if data_rows == 0 {
        Dimension::default()
    } else {
        Dimension::new(row_index - 1, columns.len() as u32)
    };

    log::debug!(
        "serialized worksheet: {} data rows, {} columns, dimension {}",
        data_rows,
        columns.len(),
        dimension
    );

    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<dimension ref="{}"/>
<sheetData>{}</sheetData>
</worksheet>"#,
        dimension, sheet_data
    );

    Ok(WorksheetXml { xml, dimension })
}

fn next_row(row: u32) -> mini_sheets_core::Result<u32> {
    row.checked_add(1)
        .ok_or(Error::RowOutOfBounds(u32::MAX, MAX_ROWS))
}

fn write_row<I>(out: &mut String, start_col: u32, row: u32, cells: I)
where
    I: Iterator<Item = EncodedCell>,
{
    out.push_str(&format!("\n<row r=\"{}\">", row));

    let mut addr = CellAddress {
        col: start_col,
        row,
    };
    for cell in cells {
        out.push_str(&format!(
            "<c r=\"{}\" {}><v>{}</v></c>",
            addr,
            cell.tag.attribute(),
            cell.text
        ));
        addr = addr.next_col();
    }

    out.push_str("</row>");
    log::trace!("wrote row {}", row);
}
