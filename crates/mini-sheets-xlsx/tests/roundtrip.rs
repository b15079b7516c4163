//! End-to-end tests: write a package, read it back

use std::io::{Cursor, Read};

use chrono::{NaiveDate, NaiveDateTime};
use mini_sheets_core::{impl_record, CellValue, DataTable, Error, Field, Record};
use mini_sheets_xlsx::{
    QueryExt, ReadOptions, WriteOptions, XlsxError, XlsxReader, XlsxWriter,
};
use pretty_assertions::assert_eq;
use uuid::Uuid;

#[derive(Debug, Default, Clone, PartialEq)]
struct Item {
    name: String,
    qty: i64,
}

impl_record!(Item { name, qty });

#[derive(Debug, Default, Clone, PartialEq)]
struct Employee {
    id: Uuid,
    name: String,
    age: i32,
    active: bool,
    hired: NaiveDateTime,
    rating: f64,
}

impl_record!(Employee {
    id,
    name,
    age,
    active,
    hired,
    rating
});

#[derive(Debug, Default, PartialEq)]
struct Sparse {
    first: i32,
    middle: Option<String>,
    last: i32,
}

impl_record!(Sparse { first, middle, last });

#[derive(Debug, Default)]
struct Shapeless;

impl Record for Shapeless {
    fn fields() -> &'static [Field<Self>] {
        &[]
    }
}

fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

fn items() -> Vec<Item> {
    vec![
        Item {
            name: "apple".into(),
            qty: 3,
        },
        Item {
            name: "pear".into(),
            qty: 0,
        },
        Item {
            name: "fig & date".into(),
            qty: -12,
        },
    ]
}

fn write_to_vec<S: mini_sheets_xlsx::SheetSource + ?Sized>(
    source: &S,
    options: &WriteOptions,
) -> Vec<u8> {
    XlsxWriter::write(source, Cursor::new(Vec::new()), options)
        .unwrap()
        .into_inner()
}

fn worksheet_xml(data: &[u8]) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
    let mut file = archive.by_name("xl/worksheets/sheet1.xml").unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}

#[test]
fn test_three_records_untyped_with_header() {
    let data = write_to_vec(&items(), &WriteOptions::default());

    let mut reader = XlsxReader::open(Cursor::new(data)).unwrap();
    let rows: Vec<_> = reader
        .rows(&ReadOptions::with_header_row())
        .unwrap()
        .map(Result::unwrap)
        .collect();

    assert_eq!(rows.len(), 3);
    for (row, item) in rows.iter().zip(items()) {
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["name", "qty"]);
        assert_eq!(row.text("name"), Some(item.name.as_str()));
        assert_eq!(row.text("qty"), Some(item.qty.to_string().as_str()));
    }
}

#[test]
fn test_typed_roundtrip() {
    let employees = vec![
        Employee {
            id: Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap(),
            name: "Ada".into(),
            age: 36,
            active: true,
            hired: datetime(2021, 3, 4, 5, 6, 7),
            rating: 4.5,
        },
        Employee {
            id: Uuid::nil(),
            name: "Grace <admin>".into(),
            age: 85,
            active: false,
            hired: datetime(1999, 12, 31, 23, 59, 59),
            rating: -0.25,
        },
    ];

    let data = write_to_vec(&employees, &WriteOptions::default());
    let mut reader = XlsxReader::open(Cursor::new(data)).unwrap();
    let back: Vec<Employee> = reader
        .records::<Employee>()
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(back, employees);
}

#[test]
fn test_cell_encoding() {
    #[derive(Debug, Default)]
    struct Flags {
        on: bool,
        off: bool,
        when: NaiveDateTime,
    }
    impl_record!(Flags { on, off, when });

    let data = write_to_vec(
        &vec![Flags {
            on: true,
            off: false,
            when: datetime(2021, 1, 1, 0, 0, 0),
        }],
        &WriteOptions::default(),
    );
    let xml = worksheet_xml(&data);

    assert!(xml.contains(r#"<c r="A2" t="b"><v>1</v></c>"#));
    assert!(xml.contains(r#"<c r="B2" t="b"><v>0</v></c>"#));
    assert!(xml.contains(r#"<c r="C2" s="1"><v>44197</v></c>"#));
    assert!(xml.contains(r#"<dimension ref="A1:C2"/>"#));
}

#[test]
fn test_serial_text_maps_to_date() {
    #[derive(Debug, Default)]
    struct Due {
        due: NaiveDateTime,
    }
    impl_record!(Due { due });

    let mut table = DataTable::with_columns(["due"]);
    table.add_row(["44197"]).unwrap();

    let data = write_to_vec(&table, &WriteOptions::default());
    let mut reader = XlsxReader::open(Cursor::new(data)).unwrap();
    let due = reader.records::<Due>().unwrap().single().unwrap();

    assert_eq!(due.due, datetime(2021, 1, 1, 0, 0, 0));
}

#[test]
fn test_boolean_literals_accepted() {
    #[derive(Debug, Default)]
    struct Flag {
        flag: bool,
    }
    impl_record!(Flag { flag });

    let mut table = DataTable::with_columns(["flag"]);
    for text in ["1", "0", "True", "false"] {
        table.add_row([text]).unwrap();
    }

    let data = write_to_vec(&table, &WriteOptions::default());
    let mut reader = XlsxReader::open(Cursor::new(data)).unwrap();
    let flags: Vec<bool> = reader
        .records::<Flag>()
        .unwrap()
        .map(|r| r.unwrap().flag)
        .collect();

    assert_eq!(flags, vec![true, false, true, false]);
}

#[test]
fn test_zero_records_with_fields() {
    let empty: Vec<Item> = Vec::new();
    let data = write_to_vec(&empty, &WriteOptions::default());

    assert!(worksheet_xml(&data).contains(r#"<dimension ref="A1"/>"#));

    let mut reader = XlsxReader::open(Cursor::new(data)).unwrap();
    assert_eq!(reader.records::<Item>().unwrap().count(), 0);
    assert!(reader.records::<Item>().unwrap().first_or_none().unwrap().is_none());
}

#[test]
fn test_shapeless_records_fail() {
    let records = vec![Shapeless];
    let err = XlsxWriter::write(&records, Cursor::new(Vec::new()), &WriteOptions::default())
        .unwrap_err();

    assert!(matches!(err, XlsxError::Core(Error::Configuration(_))));
}

#[test]
fn test_null_stops_population() {
    let rows = vec![Sparse {
        first: 1,
        middle: None,
        last: 3,
    }];

    let data = write_to_vec(&rows, &WriteOptions::default());
    let mut reader = XlsxReader::open(Cursor::new(data)).unwrap();
    let back = reader.records::<Sparse>().unwrap().first().unwrap();

    assert_eq!(
        back,
        Sparse {
            first: 1,
            middle: None,
            last: 0,
        }
    );
}

#[test]
fn test_cast_error_ends_sequence() {
    let mut table = DataTable::with_columns(["name", "qty"]);
    table.add_row(["ok", "1"]).unwrap();
    table.add_row(["bad", "lots"]).unwrap();
    table.add_row(["never", "2"]).unwrap();

    let data = write_to_vec(&table, &WriteOptions::default());
    let mut reader = XlsxReader::open(Cursor::new(data)).unwrap();
    let mut records = reader.records::<Item>().unwrap();

    assert_eq!(records.next().unwrap().unwrap().qty, 1);
    assert!(matches!(
        records.next(),
        Some(Err(XlsxError::Core(Error::Cast { .. })))
    ));
    assert!(records.next().is_none());
}

#[test]
fn test_untyped_without_header_uses_letters() {
    let data = write_to_vec(
        &items(),
        &WriteOptions {
            print_header: false,
            ..WriteOptions::default()
        },
    );

    let mut reader = XlsxReader::open(Cursor::new(data)).unwrap();
    let first = reader
        .rows(&ReadOptions::default())
        .unwrap()
        .first()
        .unwrap();

    assert_eq!(first.keys().collect::<Vec<_>>(), vec!["A", "B"]);
    assert_eq!(first.text("A"), Some("apple"));
    assert_eq!(first.text("B"), Some("3"));
}

#[test]
fn test_offset_start_cell() {
    let options = WriteOptions::starting_at("C3").unwrap();
    let data = write_to_vec(&items(), &options);

    let mut reader = XlsxReader::open(Cursor::new(data.clone())).unwrap();
    let back: Vec<Item> = reader
        .records::<Item>()
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(back, items());

    let mut reader = XlsxReader::open(Cursor::new(data)).unwrap();
    let first = reader
        .rows(&ReadOptions::default())
        .unwrap()
        .first()
        .unwrap();
    assert_eq!(first.keys().collect::<Vec<_>>(), vec!["A", "B", "C", "D"]);
    assert_eq!(first.get("A"), Some(None));
    assert_eq!(first.text("C"), Some("name"));
}

#[test]
fn test_control_characters_roundtrip() {
    let mut table = DataTable::with_columns(["text"]);
    table
        .add_row(vec![CellValue::from("bell\u{7} and _x0041_\r\nnext")])
        .unwrap();

    let data = write_to_vec(&table, &WriteOptions::default());
    let mut reader = XlsxReader::open(Cursor::new(data)).unwrap();
    let row = reader
        .rows(&ReadOptions::with_header_row())
        .unwrap()
        .single()
        .unwrap();

    assert_eq!(row.text("text"), Some("bell\u{7} and _x0041_\r\nnext"));
}

#[test]
fn test_single_rejects_many() {
    let data = write_to_vec(&items(), &WriteOptions::default());
    let mut reader = XlsxReader::open(Cursor::new(data)).unwrap();

    assert!(matches!(
        reader.records::<Item>().unwrap().single(),
        Err(XlsxError::MoreThanOneRow)
    ));
}

#[test]
fn test_write_file_then_open_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.xlsx");

    XlsxWriter::write_file(&items(), &path, &WriteOptions::default()).unwrap();
    assert!(matches!(
        XlsxWriter::write_file(&items(), &path, &WriteOptions::default()),
        Err(XlsxError::AlreadyExists(_))
    ));

    let mut reader = XlsxReader::open_file(&path).unwrap();
    assert_eq!(reader.records::<Item>().unwrap().count(), 3);
}
