//! Cell value types and the value type classifier

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::date;

/// Style index of the date cell format in the package's style sheet
pub const DATE_STYLE_INDEX: u32 = 1;

/// Represents the value stored in a cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Empty cell (null)
    #[default]
    Empty,

    /// Boolean value
    Boolean(bool),

    /// Integral numeric value
    Integer(i64),

    /// Floating point numeric value
    Number(f64),

    /// String value
    String(String),

    /// Date/time, written as a serial day count
    DateTime(NaiveDateTime),
}

/// How a cell's text is to be interpreted, emitted as an attribute on `<c>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// `t="str"`
    Str,
    /// `t="n"`
    Number,
    /// `t="b"`
    Boolean,
    /// `s="1"`: a numeric serial rendered with the date style
    Date,
}

impl TypeTag {
    /// The attribute written on the cell element
    pub fn attribute(&self) -> String {
        match self {
            TypeTag::Str => r#"t="str""#.to_string(),
            TypeTag::Number => r#"t="n""#.to_string(),
            TypeTag::Boolean => r#"t="b""#.to_string(),
            TypeTag::Date => format!(r#"s="{}""#, DATE_STYLE_INDEX),
        }
    }
}

/// A classified cell: its type tag and XML-escaped text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCell {
    pub tag: TypeTag,
    pub text: String,
}

impl CellValue {
    /// Create a new string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(s.into())
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Decide the type tag and encoded text for this value
    ///
    /// Booleans and dates are checked first; everything else is rendered as
    /// invariant text and tagged numeric only if that text parses as a
    /// decimal.
    pub fn classify(&self) -> EncodedCell {
        match self {
            CellValue::Boolean(b) => EncodedCell {
                tag: TypeTag::Boolean,
                text: if *b { "1" } else { "0" }.to_string(),
            },
            CellValue::DateTime(dt) => EncodedCell {
                tag: TypeTag::Date,
                text: date::to_oa_date(dt).to_string(),
            },
            CellValue::Empty => EncodedCell {
                tag: TypeTag::Str,
                text: String::new(),
            },
            other => {
                let text = other.to_string();
                match decimal_text(&text) {
                    Some(number) => EncodedCell {
                        tag: TypeTag::Number,
                        text: number,
                    },
                    None => EncodedCell {
                        tag: TypeTag::Str,
                        text: escape_text(&text),
                    },
                }
            }
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Boolean(_) => "boolean",
            CellValue::Integer(_) => "integer",
            CellValue::Number(_) => "number",
            CellValue::String(_) => "string",
            CellValue::DateTime(_) => "datetime",
        }
    }
}

/// Invariant rendering of a value
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, ""),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Integer(n) => write!(f, "{}", n),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Integer(n as i64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Integer(n)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::string(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CellValue::Empty, Into::into)
    }
}

/// `text` as a `<v>` element carries it, if it reads as a decimal
///
/// Surrounding whitespace and `,` group separators in the integer part are
/// accepted and dropped, so `" 1,000"` is written as `1000`.
fn decimal_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains('_') {
        return None;
    }

    let (int_part, frac_part) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    if frac_part.contains(',')
        || int_part
            .trim_start_matches(|c: char| c == '+' || c == '-')
            .starts_with(',')
    {
        return None;
    }

    let number: String = trimmed.chars().filter(|&c| c != ',').collect();
    Decimal::from_str(&number).ok()?;
    Some(number)
}

/// Escape text for an XML text node
///
/// `&`, `<` and `>` become entities. Control characters other than tab and
/// line feed are written as `_xHHHH_`, so a carriage return survives XML
/// line-end normalization. An underscore that would otherwise read back
/// as the start of such a sequence is written as `_x005F_`.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());

    for (i, c) in s.char_indices() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '_' if looks_like_escape(&s[i..]) => out.push_str("_x005F_"),
            '\t' | '\n' => out.push(c),
            c if (c as u32) < 0x20 => out.push_str(&format!("_x{:04X}_", c as u32)),
            c => out.push(c),
        }
    }

    out
}

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode special characters in XML:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
pub fn decode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find('_') {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];

        let decoded = if looks_like_escape(candidate) {
            u32::from_str_radix(&candidate[2..6], 16)
                .ok()
                .and_then(char::from_u32)
        } else {
            None
        };

        match decoded {
            Some(ch) => {
                result.push(ch);
                rest = &candidate[7..];
            }
            None => {
                result.push('_');
                rest = &candidate[1..];
            }
        }
    }

    result.push_str(rest);
    result
}

/// `_xHHHH_` at the start of `s`
fn looks_like_escape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 7
        && b[0] == b'_'
        && b[1] == b'x'
        && b[2..6].iter().all(|c| c.is_ascii_hexdigit())
        && b[6] == b'_'
}
