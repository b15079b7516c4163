//! Lazy row sequence over one worksheet part

use std::io::{BufReader, Read};
use std::marker::PhantomData;
use std::rc::Rc;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use mini_sheets_core::cell::decode_excel_escapes;
use mini_sheets_core::{map_row, CellAddress, Dimension, RawRow, Record, RowKeys};

use crate::error::{XlsxError, XlsxResult};

/// How a cell's text is stored, from its `t` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    /// `t="s"`: index into the shared-string table
    Shared,
    /// `t="str"` or `t="inlineStr"`: literal text
    Text,
    /// Numbers, booleans, date serials and anything else: raw `<v>` text
    Raw,
}

impl CellKind {
    fn from_attr(t: Option<&str>) -> Self {
        match t {
            Some("s") => CellKind::Shared,
            Some("str") | Some("inlineStr") => CellKind::Text,
            None | Some("n") | Some("b") | Some("e") | Some("d") => CellKind::Raw,
            Some(other) => {
                log::warn!("unknown cell type '{}', reading raw text", other);
                CellKind::Raw
            }
        }
    }
}

/// A cell being read
struct PendingCell {
    col: u32,
    kind: CellKind,
    text: Option<String>,
}

/// A cell's column and resolved text
type SheetCell = (u32, Option<String>);

/// Pull parser over `<sheetData>`, one `<row>` element at a time
struct SheetParser<R: Read> {
    xml: Reader<BufReader<R>>,
    buf: Vec<u8>,
    shared_strings: Rc<[String]>,
    /// Last column of the `<dimension>` element, 0 if absent
    dimension_cols: u32,
    finished: bool,
}

impl<R: Read> SheetParser<R> {
    /// Read the next row element
    ///
    /// Returns `None` after `</sheetData>` or at end of document.
    fn read_row(&mut self) -> XlsxResult<Option<Vec<SheetCell>>> {
        if self.finished {
            return Ok(None);
        }

        let mut cells: Option<Vec<SheetCell>> = None;
        let mut cell: Option<PendingCell> = None;
        let mut in_value = false;
        let mut in_text = false;
        let mut in_phonetic = false;

        loop {
            self.buf.clear();
            match self.xml.read_event_into(&mut self.buf)? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"row" => cells = Some(Vec::new()),
                    b"c" => {
                        let prev = cells.as_ref().and_then(|c| c.last()).map(|c| c.0);
                        cell = Some(start_cell(&e, prev)?);
                    }
                    b"v" => in_value = cell.is_some(),
                    b"t" => in_text = cell.is_some() && !in_phonetic,
                    b"rPh" => in_phonetic = true,
                    _ => {}
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"dimension" => {
                        if let Some(reference) = attr_value(&e, b"ref")? {
                            self.dimension_cols = Dimension::last_column(&reference).unwrap_or(0);
                            log::trace!("worksheet dimension {}", reference);
                        }
                    }
                    b"row" => return Ok(Some(Vec::new())),
                    b"c" => {
                        if let Some(row) = cells.as_mut() {
                            let prev = row.last().map(|c| c.0);
                            let empty = start_cell(&e, prev)?;
                            row.push((empty.col, None));
                        }
                    }
                    _ => {}
                },
                Event::Text(e) => {
                    if in_value || in_text {
                        if let Some(pending) = cell.as_mut() {
                            let text = e.unescape()?;
                            pending
                                .text
                                .get_or_insert_with(String::new)
                                .push_str(&text);
                        }
                    }
                }
                Event::CData(e) => {
                    if in_value || in_text {
                        if let Some(pending) = cell.as_mut() {
                            pending
                                .text
                                .get_or_insert_with(String::new)
                                .push_str(&String::from_utf8_lossy(&e));
                        }
                    }
                }
                Event::End(e) => match e.local_name().as_ref() {
                    b"v" => in_value = false,
                    b"t" => in_text = false,
                    b"rPh" => in_phonetic = false,
                    b"c" => {
                        if let (Some(pending), Some(row)) = (cell.take(), cells.as_mut()) {
                            let value =
                                resolve_text(pending.kind, pending.text, &self.shared_strings)?;
                            row.push((pending.col, value));
                        }
                    }
                    b"row" => return Ok(Some(cells.take().unwrap_or_default())),
                    b"sheetData" => {
                        self.finished = true;
                        return Ok(None);
                    }
                    _ => {}
                },
                Event::Eof => {
                    self.finished = true;
                    return Ok(None);
                }
                _ => {}
            }
        }
    }
}

/// Column and kind of a `<c>` element
///
/// A cell without a usable `r` attribute follows the previous cell in its row.
fn start_cell(e: &BytesStart<'_>, prev_col: Option<u32>) -> XlsxResult<PendingCell> {
    let mut reference = None;
    let mut kind = None;

    for attr in e.attributes().flatten() {
        match attr.key.local_name().as_ref() {
            b"r" => reference = Some(attr.unescape_value()?.into_owned()),
            b"t" => kind = Some(attr.unescape_value()?.into_owned()),
            _ => {}
        }
    }

    let positional = prev_col.map_or(1, |c| c + 1);
    let col = match reference {
        Some(r) => match CellAddress::parse(&r) {
            Ok(addr) => addr.col,
            Err(_) => {
                log::warn!("invalid cell reference '{}', using column {}", r, positional);
                positional
            }
        },
        None => positional,
    };

    Ok(PendingCell {
        col,
        kind: CellKind::from_attr(kind.as_deref()),
        text: None,
    })
}

fn attr_value(e: &BytesStart<'_>, name: &[u8]) -> XlsxResult<Option<String>> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Cell text as the row exposes it; an empty or missing value is null
fn resolve_text(
    kind: CellKind,
    text: Option<String>,
    shared_strings: &[String],
) -> XlsxResult<Option<String>> {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return Ok(None),
    };

    match kind {
        CellKind::Shared => {
            let index: usize = text
                .trim()
                .parse()
                .map_err(|_| XlsxError::Parse(format!("invalid shared string index '{}'", text)))?;
            shared_strings
                .get(index)
                .cloned()
                .map(Some)
                .ok_or_else(|| {
                    XlsxError::Parse(format!("shared string index {} out of range", index))
                })
        }
        CellKind::Text => Ok(Some(decode_excel_escapes(&text))),
        CellKind::Raw => Ok(Some(text)),
    }
}

/// Keys taken from the header row
struct Header {
    first_col: u32,
    keys: Rc<RowKeys>,
}

impl Header {
    /// Keys span the header's first to last cell; a cell with no text is
    /// keyed by its column letter
    fn from_cells(cells: Vec<SheetCell>) -> Self {
        let first_col = cells.iter().map(|c| c.0).min().unwrap_or(1);
        let last_col = cells.iter().map(|c| c.0).max().unwrap_or(0);

        let width = (last_col + 1).saturating_sub(first_col) as usize;
        let mut names: Vec<Option<String>> = vec![None; width];
        for (col, text) in cells {
            names[(col - first_col) as usize] = text;
        }

        let keys = names
            .into_iter()
            .zip(first_col..)
            .map(|(name, col)| name.unwrap_or_else(|| CellAddress::column_to_letters(col)));

        Self {
            first_col,
            keys: Rc::new(RowKeys::new(keys)),
        }
    }

    /// Values by header position; cells past the row's last cell are absent
    fn row(&self, cells: Vec<SheetCell>) -> RawRow {
        let width = self.keys.len();
        let mut values: Vec<Option<String>> = Vec::new();

        for (col, text) in cells {
            if col < self.first_col {
                continue;
            }
            let i = (col - self.first_col) as usize;
            if i >= width {
                continue;
            }
            if values.len() <= i {
                values.resize(i + 1, None);
            }
            values[i] = text;
        }

        RawRow::new(Rc::clone(&self.keys), values)
    }
}

/// Lazy, forward-only sequence of rows from one worksheet
///
/// Each call to `next` parses exactly one `<row>` element. With a header row
/// the first row supplies the keys; otherwise keys are column letters from
/// `A` to the wider of the sheet's declared dimension and the row's last
/// cell. After an error the stream yields `None`.
pub struct RowStream<R: Read> {
    parser: SheetParser<R>,
    use_header_row: bool,
    header: Option<Header>,
    lettered: Option<Rc<RowKeys>>,
    fused: bool,
}

impl<R: Read> RowStream<R> {
    pub(crate) fn new(
        xml: Reader<BufReader<R>>,
        shared_strings: Rc<[String]>,
        use_header_row: bool,
    ) -> Self {
        Self {
            parser: SheetParser {
                xml,
                buf: Vec::new(),
                shared_strings,
                dimension_cols: 0,
                finished: false,
            },
            use_header_row,
            header: None,
            lettered: None,
            fused: false,
        }
    }

    /// Keys from the header row, once it has been read
    pub fn header(&self) -> Option<&RowKeys> {
        self.header.as_ref().map(|h| h.keys.as_ref())
    }

    fn next_row(&mut self) -> XlsxResult<Option<RawRow>> {
        loop {
            let cells = match self.parser.read_row()? {
                Some(cells) => cells,
                None => return Ok(None),
            };

            if !self.use_header_row {
                return Ok(Some(self.lettered_row(cells)));
            }

            match &self.header {
                Some(header) => return Ok(Some(header.row(cells))),
                None => {
                    let header = Header::from_cells(cells);
                    log::debug!("read header row with {} keys", header.keys.len());
                    self.header = Some(header);
                }
            }
        }
    }

    fn lettered_row(&mut self, cells: Vec<SheetCell>) -> RawRow {
        let row_cols = cells.iter().map(|c| c.0).max().unwrap_or(0);
        let width = self.parser.dimension_cols.max(row_cols) as usize;

        let keys = match &self.lettered {
            Some(keys) if keys.len() == width => Rc::clone(keys),
            _ => {
                let keys = Rc::new(RowKeys::new(
                    (1..=width as u32).map(CellAddress::column_to_letters),
                ));
                self.lettered = Some(Rc::clone(&keys));
                keys
            }
        };

        let mut values = vec![None; width];
        for (col, text) in cells {
            values[(col - 1) as usize] = text;
        }

        RawRow::new(keys, values)
    }
}

impl<R: Read> Iterator for RowStream<R> {
    type Item = XlsxResult<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }

        match self.next_row() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => {
                self.fused = true;
                None
            }
            Err(e) => {
                log::warn!("stopped reading rows: {}", e);
                self.fused = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for RowStream<R> {}

/// Typed records mapped from a header-keyed [`RowStream`]
///
/// A row that fails to map ends the sequence after yielding its error.
pub struct Records<R: Read, T> {
    rows: RowStream<R>,
    fused: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<R: Read, T: Record> Records<R, T> {
    pub(crate) fn new(rows: RowStream<R>) -> Self {
        Self {
            rows,
            fused: false,
            _marker: PhantomData,
        }
    }
}

impl<R: Read, T: Record> Iterator for Records<R, T> {
    type Item = XlsxResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }

        let item = match self.rows.next()? {
            Ok(row) => map_row::<T>(&row).map_err(XlsxError::from),
            Err(e) => Err(e),
        };

        if item.is_err() {
            self.fused = true;
        }
        Some(item)
    }
}

impl<R: Read, T: Record> std::iter::FusedIterator for Records<R, T> {}
