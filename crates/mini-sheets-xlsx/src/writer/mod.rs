//! XLSX writer

mod worksheet;

pub use worksheet::{serialize_worksheet, SheetSource, WorksheetXml};

use std::fs::OpenOptions;
use std::io::{BufWriter, ErrorKind, Seek, Write};
use std::path::Path;

use crate::error::{XlsxError, XlsxResult};
use crate::options::{TextEncoding, WriteOptions};
use crate::package::{
    Package, PackagePart, CONTENT_TYPES_PATH, WORKSHEET_CONTENT_TYPE, WORKSHEET_PATH,
};

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a source to a new file at `path`
    ///
    /// Fails with [`XlsxError::AlreadyExists`] if the file is already there.
    pub fn write_file<S, P>(source: &S, path: P, options: &WriteOptions) -> XlsxResult<()>
    where
        S: SheetSource + ?Sized,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => XlsxError::AlreadyExists(path.to_path_buf()),
                _ => XlsxError::Io(e),
            })?;

        let mut writer = Self::write(source, BufWriter::new(file), options)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a source to a seekable sink and hand the sink back
    pub fn write<S, W>(source: &S, writer: W, options: &WriteOptions) -> XlsxResult<W>
    where
        S: SheetSource + ?Sized,
        W: Write + Seek,
    {
        let package = Self::build_package(source, options)?;
        Self::write_package(&package, writer, options.encoding)
    }

    /// The template parts with the serialized worksheet laid over them
    pub fn build_package<S>(source: &S, options: &WriteOptions) -> XlsxResult<Package>
    where
        S: SheetSource + ?Sized,
    {
        let worksheet = serialize_worksheet(source, options)?;

        let mut package = Package::template();
        package.insert(PackagePart::new(
            WORKSHEET_PATH,
            worksheet.xml,
            WORKSHEET_CONTENT_TYPE,
        ));
        Ok(package)
    }

    /// Write the content-type manifest followed by every part of `package`
    pub fn write_package<W: Write + Seek>(
        package: &Package,
        writer: W,
        encoding: TextEncoding,
    ) -> XlsxResult<W> {
        let mut zip = zip::ZipWriter::new(writer);

        log::debug!("writing package with {} parts", package.len());

        Self::write_entry(
            &mut zip,
            CONTENT_TYPES_PATH,
            &package.content_types_xml(),
            encoding,
        )?;

        for part in package.parts() {
            Self::write_entry(&mut zip, &part.path, &part.xml, encoding)?;
        }

        Ok(zip.finish()?)
    }

    fn write_entry<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        path: &str,
        xml: &str,
        encoding: TextEncoding,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(path, options)?;
        zip.write_all(encoding.preamble())?;
        zip.write_all(xml.as_bytes())?;

        log::trace!("wrote entry {} ({} bytes)", path, xml.len());
        Ok(())
    }
}
