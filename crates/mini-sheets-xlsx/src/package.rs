//! Package parts and the baseline template set
//!
//! A package maps entry paths to XML parts. Every generated package starts
//! from [`Package::template`] and overlays its worksheet at
//! [`WORKSHEET_PATH`].

use std::collections::BTreeMap;

/// Path of the content-type manifest entry
pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";

/// Conventional path of the single worksheet
pub const WORKSHEET_PATH: &str = "xl/worksheets/sheet1.xml";

pub const RELATIONSHIPS_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-package.relationships+xml";
pub const WORKBOOK_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
pub const WORKSHEET_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
pub const STYLES_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";
pub const SHARED_STRINGS_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml";

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
    <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>
</Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>
        <sheet name="Sheet1" sheetId="1" r:id="rId1"/>
    </sheets>
</workbook>"#;

// cellXfs index 1 is the date style referenced by s="1" cells
const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <fonts count="1">
        <font><sz val="11"/><name val="Calibri"/><family val="2"/></font>
    </fonts>
    <fills count="2">
        <fill><patternFill patternType="none"/></fill>
        <fill><patternFill patternType="gray125"/></fill>
    </fills>
    <borders count="1">
        <border><left/><right/><top/><bottom/><diagonal/></border>
    </borders>
    <cellStyleXfs count="1">
        <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
    </cellStyleXfs>
    <cellXfs count="2">
        <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
        <xf numFmtId="22" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>
    </cellXfs>
    <cellStyles count="1">
        <cellStyle name="Normal" xfId="0" builtinId="0"/>
    </cellStyles>
</styleSheet>"#;

const SHARED_STRINGS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="0" uniqueCount="0"></sst>"#;

/// One named XML document inside the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePart {
    /// Entry name, forward-slash separated, no leading slash
    pub path: String,
    /// Entry payload
    pub xml: String,
    /// Declared content type
    pub content_type: String,
}

impl PackagePart {
    pub fn new<P, X, C>(path: P, xml: X, content_type: C) -> Self
    where
        P: Into<String>,
        X: Into<String>,
        C: Into<String>,
    {
        Self {
            path: path.into(),
            xml: xml.into(),
            content_type: content_type.into(),
        }
    }

    /// Part name as written in the manifest (leading slash)
    pub fn part_name(&self) -> String {
        format!("/{}", self.path.trim_start_matches('/'))
    }
}

/// The set of parts in a package, unique by path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Package {
    parts: BTreeMap<String, PackagePart>,
}

impl Package {
    /// An empty package
    pub fn new() -> Self {
        Self::default()
    }

    /// The baseline parts every generated package contains: relationships,
    /// workbook manifest, style sheet and an empty shared-string table
    pub fn template() -> Self {
        let mut package = Self::new();
        package.insert(PackagePart::new(
            "_rels/.rels",
            ROOT_RELS,
            RELATIONSHIPS_CONTENT_TYPE,
        ));
        package.insert(PackagePart::new(
            "xl/_rels/workbook.xml.rels",
            WORKBOOK_RELS,
            RELATIONSHIPS_CONTENT_TYPE,
        ));
        package.insert(PackagePart::new(
            "xl/workbook.xml",
            WORKBOOK,
            WORKBOOK_CONTENT_TYPE,
        ));
        package.insert(PackagePart::new(
            "xl/styles.xml",
            STYLES,
            STYLES_CONTENT_TYPE,
        ));
        package.insert(PackagePart::new(
            "xl/sharedStrings.xml",
            SHARED_STRINGS,
            SHARED_STRINGS_CONTENT_TYPE,
        ));
        package
    }

    /// Add a part, replacing any part already at its path
    pub fn insert(&mut self, part: PackagePart) -> Option<PackagePart> {
        self.parts.insert(part.path.clone(), part)
    }

    pub fn get(&self, path: &str) -> Option<&PackagePart> {
        self.parts.get(path)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Parts in path order
    pub fn parts(&self) -> impl Iterator<Item = &PackagePart> {
        self.parts.values()
    }

    /// Build the `[Content_Types].xml` manifest: defaults for the `xml` and
    /// `rels` extensions, then one override per part
    pub fn content_types_xml(&self) -> String {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="xml" ContentType="application/xml"/>
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
        );

        for part in self.parts() {
            content.push_str(&format!(
                "\n    <Override PartName=\"{}\" ContentType=\"{}\"/>",
                part.part_name(),
                part.content_type
            ));
        }

        content.push_str("\n</Types>");
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_template_parts() {
        let package = Package::template();
        let paths: Vec<_> = package.parts().map(|p| p.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "_rels/.rels",
                "xl/_rels/workbook.xml.rels",
                "xl/sharedStrings.xml",
                "xl/styles.xml",
                "xl/workbook.xml",
            ]
        );
        assert!(package.get(WORKSHEET_PATH).is_none());
    }

    #[test]
    fn test_insert_overlays_by_path() {
        let mut package = Package::template();
        let before = package.len();

        let old = package.insert(PackagePart::new(
            "xl/styles.xml",
            "<styleSheet/>",
            STYLES_CONTENT_TYPE,
        ));

        assert!(old.is_some());
        assert_eq!(package.len(), before);
        assert_eq!(package.get("xl/styles.xml").unwrap().xml, "<styleSheet/>");
    }

    #[test]
    fn test_content_types_manifest() {
        let mut package = Package::new();
        package.insert(PackagePart::new(
            WORKSHEET_PATH,
            "<worksheet/>",
            WORKSHEET_CONTENT_TYPE,
        ));

        let xml = package.content_types_xml();
        assert!(xml.contains(r#"<Default Extension="xml" ContentType="application/xml"/>"#));
        assert!(xml.contains(r#"<Default Extension="rels""#));
        assert!(xml.contains(
            r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        ));
        assert_eq!(xml.matches("<Override").count(), 1);
    }

    #[test]
    fn test_part_name_has_single_leading_slash() {
        let part = PackagePart::new("/xl/workbook.xml", "", WORKBOOK_CONTENT_TYPE);
        assert_eq!(part.part_name(), "/xl/workbook.xml");
    }
}
