//! Typed row mapping
//!
//! Populates a [`Record`] from a [`RawRow`] by field name, coercing cell text
//! into each field's declared type.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::str::FromStr;
use uuid::Uuid;

use crate::date;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::row::RawRow;

/// General date/time layouts tried before the explicit day-first pattern
const GENERAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const GENERAL_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Build a record from one row
///
/// Fields without a same-named key keep their default and keys without a
/// field are ignored. A matched key whose value is null stops population:
/// the record is returned as filled so far, with later fields left at their
/// defaults.
pub fn map_row<T: Record>(row: &RawRow) -> Result<T> {
    let mut record = T::default();

    for field in T::fields() {
        match row.get(field.name) {
            None => continue,
            Some(None) => return Ok(record),
            Some(Some(text)) => (field.set)(&mut record, text)?,
        }
    }

    Ok(record)
}

/// Parse a unique identifier
pub fn parse_uuid(text: &str) -> Result<Uuid> {
    Uuid::parse_str(text.trim()).map_err(|_| Error::Format {
        value: text.to_string(),
        target: "uuid",
    })
}

/// Parse a date/time
///
/// Tries general date/time layouts, then `dd/MM/yyyy`, then a serial day
/// count.
pub fn parse_datetime(text: &str) -> Result<NaiveDateTime> {
    let s = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }
    for fmt in GENERAL_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    for fmt in GENERAL_DATE_FORMATS {
        if let Some(dt) = NaiveDate::parse_from_str(s, fmt)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Ok(dt);
        }
    }

    if let Some(dt) = NaiveDate::parse_from_str(s, "%d/%m/%Y")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(dt);
    }

    s.parse::<f64>()
        .ok()
        .and_then(date::from_oa_date)
        .ok_or_else(|| Error::cast(text, "datetime"))
}

/// Parse a boolean: `1`/`0`, else `true`/`false` in any case
pub fn parse_bool(text: &str) -> Result<bool> {
    match text {
        "1" => Ok(true),
        "0" => Ok(false),
        other => {
            let s = other.trim();
            if s.eq_ignore_ascii_case("true") {
                Ok(true)
            } else if s.eq_ignore_ascii_case("false") {
                Ok(false)
            } else {
                Err(Error::cast(text, "boolean"))
            }
        }
    }
}

/// Generic invariant conversion through [`FromStr`]
pub fn convert<T: FromStr>(text: &str, target: &'static str) -> Result<T> {
    text.trim()
        .parse::<T>()
        .map_err(|_| Error::cast(text, target))
}
