//! Record shapes
//!
//! A record shape is a Rust struct whose fields become sheet columns. Instead
//! of discovering fields at run time, each shape carries a static, ordered
//! list of [`Field`] descriptors, usually generated with [`impl_record!`].
//!
//! ```rust
//! use mini_sheets_core::{impl_record, Record};
//!
//! #[derive(Default)]
//! struct Order {
//!     id: u32,
//!     customer: String,
//!     paid: bool,
//! }
//!
//! impl_record!(Order { id, customer, paid });
//!
//! let names: Vec<_> = Order::fields().iter().map(|f| f.name).collect();
//! assert_eq!(names, ["id", "customer", "paid"]);
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::cell::CellValue;
use crate::error::Result;
use crate::mapper;

/// Accessors for one named field of a record shape
pub struct Field<T> {
    /// Column name
    pub name: &'static str,
    /// Read the field as a cell value
    pub get: fn(&T) -> CellValue,
    /// Parse cell text into the field
    pub set: fn(&mut T, &str) -> Result<()>,
}

impl<T> Field<T> {
    pub fn value(&self, record: &T) -> CellValue {
        (self.get)(record)
    }
}

/// A struct that can be written as a sheet row and populated from one
pub trait Record: Default + 'static {
    /// Fields in column order
    fn fields() -> &'static [Field<Self>];
}

/// A field type that can be written to and read from a cell
pub trait FieldType: Sized {
    /// Name used in conversion errors
    const TYPE_NAME: &'static str;

    fn to_cell(&self) -> CellValue;

    fn from_text(text: &str) -> Result<Self>;
}

/// Implement [`Record`] for a struct by listing the fields to expose, in
/// column order
///
/// Every listed field's type must implement [`FieldType`].
#[macro_export]
macro_rules! impl_record {
    ($ty:ident { $($field:ident),+ $(,)? }) => {
        impl $crate::Record for $ty {
            fn fields() -> &'static [$crate::Field<Self>] {
                static FIELDS: &[$crate::Field<$ty>] = &[
                    $(
                        $crate::Field {
                            name: stringify!($field),
                            get: |record: &$ty| $crate::FieldType::to_cell(&record.$field),
                            set: |record: &mut $ty, text: &str| {
                                record.$field = $crate::FieldType::from_text(text)?;
                                Ok(())
                            },
                        },
                    )+
                ];
                FIELDS
            }
        }
    };
}

impl FieldType for String {
    const TYPE_NAME: &'static str = "string";

    fn to_cell(&self) -> CellValue {
        CellValue::String(self.clone())
    }

    fn from_text(text: &str) -> Result<Self> {
        Ok(text.to_string())
    }
}

macro_rules! integer_field_type {
    ($($t:ty),+) => {
        $(
            impl FieldType for $t {
                const TYPE_NAME: &'static str = stringify!($t);

                fn to_cell(&self) -> CellValue {
                    match i64::try_from(*self) {
                        Ok(n) => CellValue::Integer(n),
                        Err(_) => CellValue::String(self.to_string()),
                    }
                }

                fn from_text(text: &str) -> Result<Self> {
                    mapper::convert(text, Self::TYPE_NAME)
                }
            }
        )+
    };
}

integer_field_type!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FieldType for f64 {
    const TYPE_NAME: &'static str = "f64";

    fn to_cell(&self) -> CellValue {
        CellValue::Number(*self)
    }

    fn from_text(text: &str) -> Result<Self> {
        mapper::convert(text, Self::TYPE_NAME)
    }
}

impl FieldType for f32 {
    const TYPE_NAME: &'static str = "f32";

    fn to_cell(&self) -> CellValue {
        // via the shortest decimal form, so 0.1f32 writes as 0.1
        self.to_string()
            .parse::<f64>()
            .map_or(CellValue::Empty, CellValue::Number)
    }

    fn from_text(text: &str) -> Result<Self> {
        mapper::convert(text, Self::TYPE_NAME)
    }
}

impl FieldType for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn to_cell(&self) -> CellValue {
        CellValue::Boolean(*self)
    }

    fn from_text(text: &str) -> Result<Self> {
        mapper::parse_bool(text)
    }
}

impl FieldType for Decimal {
    const TYPE_NAME: &'static str = "decimal";

    fn to_cell(&self) -> CellValue {
        CellValue::String(self.to_string())
    }

    fn from_text(text: &str) -> Result<Self> {
        mapper::convert(text, Self::TYPE_NAME)
    }
}

impl FieldType for Uuid {
    const TYPE_NAME: &'static str = "uuid";

    fn to_cell(&self) -> CellValue {
        CellValue::String(self.hyphenated().to_string())
    }

    fn from_text(text: &str) -> Result<Self> {
        mapper::parse_uuid(text)
    }
}

impl FieldType for NaiveDateTime {
    const TYPE_NAME: &'static str = "datetime";

    fn to_cell(&self) -> CellValue {
        CellValue::DateTime(*self)
    }

    fn from_text(text: &str) -> Result<Self> {
        mapper::parse_datetime(text)
    }
}

impl FieldType for NaiveDate {
    const TYPE_NAME: &'static str = "date";

    fn to_cell(&self) -> CellValue {
        self.and_hms_opt(0, 0, 0)
            .map_or(CellValue::Empty, CellValue::DateTime)
    }

    fn from_text(text: &str) -> Result<Self> {
        mapper::parse_datetime(text).map(|dt| dt.date())
    }
}

impl<T: FieldType> FieldType for Option<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn to_cell(&self) -> CellValue {
        self.as_ref().map_or(CellValue::Empty, T::to_cell)
    }

    fn from_text(text: &str) -> Result<Self> {
        T::from_text(text).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Default, PartialEq)]
    struct Item {
        sku: String,
        qty: u32,
        price: f64,
        note: Option<String>,
    }

    impl_record!(Item {
        sku,
        qty,
        price,
        note,
    });

    #[test]
    fn test_field_order_and_names() {
        let names: Vec<_> = Item::fields().iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["sku", "qty", "price", "note"]);
    }

    #[test]
    fn test_field_getters() {
        let item = Item {
            sku: "X-1".into(),
            qty: 3,
            price: 9.99,
            note: None,
        };
        let values: Vec<_> = Item::fields().iter().map(|f| f.value(&item)).collect();
        assert_eq!(
            values,
            vec![
                CellValue::string("X-1"),
                CellValue::Integer(3),
                CellValue::Number(9.99),
                CellValue::Empty,
            ]
        );
    }

    #[test]
    fn test_field_setters() {
        let mut item = Item::default();
        for (field, text) in Item::fields().iter().zip(["Y-2", "7", "1.5", "fragile"]) {
            (field.set)(&mut item, text).unwrap();
        }
        assert_eq!(
            item,
            Item {
                sku: "Y-2".into(),
                qty: 7,
                price: 1.5,
                note: Some("fragile".into()),
            }
        );
    }

    #[test]
    fn test_fields_are_cached() {
        assert!(std::ptr::eq(Item::fields(), Item::fields()));
    }

    #[test]
    fn test_wide_integers_fall_back_to_text() {
        assert_eq!(u64::MAX.to_cell(), CellValue::string("18446744073709551615"));
        assert_eq!(7u64.to_cell(), CellValue::Integer(7));
    }

    #[test]
    fn test_f32_writes_shortest_form() {
        assert_eq!(0.1f32.to_cell(), CellValue::Number(0.1));
    }

    #[test]
    fn test_date_fields() {
        let d = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert_eq!(
            d.to_cell(),
            CellValue::DateTime(d.and_hms_opt(0, 0, 0).unwrap())
        );
        assert_eq!(NaiveDate::from_text("44197").unwrap(), d);
    }
}
