//! XLSX reader

mod query;
mod rows;

pub use query::QueryExt;
pub use rows::{Records, RowStream};

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek};
use std::path::Path;
use std::rc::Rc;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use crate::options::{ReadOptions, UTF8_BOM};
use crate::package::{CONTENT_TYPES_PATH, WORKSHEET_PATH};
use mini_sheets_core::cell::decode_excel_escapes;
use mini_sheets_core::Record;

/// XLSX package reader
///
/// Opening a package checks its manifest, loads the shared-string table and
/// locates the first worksheet. Rows are then read lazily from that
/// worksheet, one `<row>` element per pull.
pub struct XlsxReader<R: Read + Seek> {
    archive: zip::ZipArchive<R>,
    shared_strings: Rc<[String]>,
    sheet_path: String,
}

impl XlsxReader<BufReader<File>> {
    /// Open a package from a file path
    pub fn open_file<P: AsRef<Path>>(path: P) -> XlsxResult<Self> {
        let file = File::open(path)?;
        Self::open(BufReader::new(file))
    }
}

impl<R: Read + Seek> XlsxReader<R> {
    /// Open a package from a reader
    pub fn open(reader: R) -> XlsxResult<Self> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name(CONTENT_TYPES_PATH).is_err() {
            return Err(XlsxError::InvalidFormat(format!(
                "Missing {}",
                CONTENT_TYPES_PATH
            )));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let sheet_path = Self::find_first_sheet(&mut archive)?;

        log::debug!(
            "opened package: worksheet {}, {} shared strings",
            sheet_path,
            shared_strings.len()
        );

        Ok(Self {
            archive,
            shared_strings: shared_strings.into(),
            sheet_path,
        })
    }

    /// Entry path of the worksheet rows are read from
    pub fn sheet_path(&self) -> &str {
        &self.sheet_path
    }

    /// The shared-string table
    pub fn shared_strings(&self) -> &[String] {
        &self.shared_strings
    }

    /// Lazy sequence of rows keyed by header name or column letter
    pub fn rows(&mut self, options: &ReadOptions) -> XlsxResult<RowStream<impl Read + '_>> {
        let file = self
            .archive
            .by_name(&self.sheet_path)
            .map_err(|_| XlsxError::MissingPart(self.sheet_path.clone()))?;

        let xml = part_reader(file)?;
        Ok(RowStream::new(
            xml,
            Rc::clone(&self.shared_strings),
            options.use_header_row,
        ))
    }

    /// Lazy sequence of records, keyed by the header row
    pub fn records<T: Record>(&mut self) -> XlsxResult<Records<impl Read + '_, T>> {
        let rows = self.rows(&ReadOptions::with_header_row())?;
        Ok(Records::new(rows))
    }

    /// Read the shared strings table
    fn read_shared_strings(archive: &mut zip::ZipArchive<R>) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let mut xml_reader = part_reader(file)?;
        let mut buf = Vec::new();
        let mut current = String::new();
        let mut in_si = false;
        let mut in_t = false;
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current.clear();
                    }
                    b"t" if in_si && !in_phonetic => in_t = true,
                    b"rPh" => in_phonetic = true,
                    _ => {}
                },
                Event::Empty(e) if e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Event::End(e) => match e.local_name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current));
                        in_si = false;
                    }
                    b"t" => in_t = false,
                    b"rPh" => in_phonetic = false,
                    _ => {}
                },
                Event::Text(e) if in_t => current.push_str(&e.unescape()?),
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Path of the first sheet named in `xl/workbook.xml`, resolved through
    /// the workbook relationships; the conventional path if either part is
    /// missing
    fn find_first_sheet(archive: &mut zip::ZipArchive<R>) -> XlsxResult<String> {
        let path = match Self::read_first_sheet_id(archive)? {
            Some(id) => Self::read_worksheet_targets(archive)?.remove(&id),
            None => None,
        };

        Ok(path.unwrap_or_else(|| {
            log::debug!("no worksheet relationship found, using {}", WORKSHEET_PATH);
            WORKSHEET_PATH.to_string()
        }))
    }

    /// Relationship id of the first `<sheet>` in workbook.xml
    fn read_first_sheet_id(archive: &mut zip::ZipArchive<R>) -> XlsxResult<Option<String>> {
        let file = match archive.by_name("xl/workbook.xml") {
            Ok(f) => f,
            Err(_) => return Ok(None),
        };

        let mut xml_reader = part_reader(file)?;
        let mut buf = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"sheet" => {
                    for attr in e.attributes().flatten() {
                        if attr.key.local_name().as_ref() == b"id" {
                            return Ok(Some(attr.unescape_value()?.into_owned()));
                        }
                    }
                }
                Event::Eof => return Ok(None),
                _ => {}
            }
            buf.clear();
        }
    }

    /// Worksheet relationship targets by id, as entry paths
    fn read_worksheet_targets(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let mut rels = HashMap::new();

        let file = match archive.by_name("xl/_rels/workbook.xml.rels") {
            Ok(f) => f,
            Err(_) => return Ok(rels),
        };

        let mut xml_reader = part_reader(file)?;
        let mut buf = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e)
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut id = None;
                    let mut target = None;
                    let mut rel_type = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => id = Some(attr.unescape_value()?.into_owned()),
                            b"Target" => target = Some(attr.unescape_value()?.into_owned()),
                            b"Type" => rel_type = Some(attr.unescape_value()?.into_owned()),
                            _ => {}
                        }
                    }

                    // Only include worksheet relationships
                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Target is relative to xl/ folder
                            let full_path = match target.strip_prefix('/') {
                                Some(absolute) => absolute.to_string(),
                                None => format!("xl/{}", target),
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }
}

/// XML reader over one archive entry, past any UTF-8 byte-order mark
pub(crate) fn part_reader<R: Read>(source: R) -> XlsxResult<Reader<BufReader<R>>> {
    let mut source = BufReader::new(source);
    if source.fill_buf()?.starts_with(UTF8_BOM) {
        source.consume(UTF8_BOM.len());
    }

    let mut xml_reader = Reader::from_reader(source);
    xml_reader.trim_text(false);
    Ok(xml_reader)
}
