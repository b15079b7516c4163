//! Serial date conversion
//!
//! Spreadsheets store dates as a floating-point count of days since
//! 1899-12-30 (OLE Automation dates), with the time of day as the fraction.
//! For serials before the epoch the integral part counts days backwards while
//! the fraction still counts time forwards, so `-1.25` is 1899-12-29 06:00.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// `num_days_from_ce` of 1899-12-30
const EPOCH_DAYS_FROM_CE: i64 = 693_594;

/// Smallest serial accepted by [`from_oa_date`] (exclusive)
pub const MIN_SERIAL: f64 = -657_435.0;

/// Largest serial accepted by [`from_oa_date`] (exclusive)
pub const MAX_SERIAL: f64 = 2_958_466.0;

/// Convert a date/time to its serial day count, at millisecond precision
pub fn to_oa_date(dt: &NaiveDateTime) -> f64 {
    let days = dt.date().num_days_from_ce() as i64 - EPOCH_DAYS_FROM_CE;
    let time_millis = dt.time().num_seconds_from_midnight() as i64 * 1000
        + (dt.time().nanosecond().min(999_999_999) / 1_000_000) as i64;

    let mut millis = days * MILLIS_PER_DAY + time_millis;
    if millis < 0 {
        let frac = millis % MILLIS_PER_DAY;
        if frac != 0 {
            millis -= (MILLIS_PER_DAY + frac) * 2;
        }
    }

    millis as f64 / MILLIS_PER_DAY as f64
}

/// Convert a serial day count back to a date/time
///
/// Returns `None` for serials outside (`MIN_SERIAL`, `MAX_SERIAL`) or NaN.
pub fn from_oa_date(serial: f64) -> Option<NaiveDateTime> {
    if !(serial > MIN_SERIAL && serial < MAX_SERIAL) {
        return None;
    }

    let rounding = if serial >= 0.0 { 0.5 } else { -0.5 };
    let mut millis = (serial * MILLIS_PER_DAY as f64 + rounding) as i64;
    if millis < 0 {
        millis -= (millis % MILLIS_PER_DAY) * 2;
    }

    let days = millis.div_euclid(MILLIS_PER_DAY);
    let time_millis = millis.rem_euclid(MILLIS_PER_DAY);

    let date = NaiveDate::from_num_days_from_ce_opt(i32::try_from(EPOCH_DAYS_FROM_CE + days).ok()?)?;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(
        (time_millis / 1000) as u32,
        ((time_millis % 1000) * 1_000_000) as u32,
    )?;

    Some(date.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_epoch() {
        assert_eq!(to_oa_date(&dt(1899, 12, 30, 0, 0, 0)), 0.0);
        assert_eq!(from_oa_date(0.0), Some(dt(1899, 12, 30, 0, 0, 0)));
    }

    #[test]
    fn test_known_serials() {
        assert_eq!(to_oa_date(&dt(1900, 1, 1, 0, 0, 0)), 2.0);
        assert_eq!(to_oa_date(&dt(2021, 1, 1, 0, 0, 0)), 44197.0);
        assert_eq!(to_oa_date(&dt(2021, 1, 1, 18, 0, 0)), 44197.75);
        assert_eq!(from_oa_date(44197.0), Some(dt(2021, 1, 1, 0, 0, 0)));
        assert_eq!(from_oa_date(44197.25), Some(dt(2021, 1, 1, 6, 0, 0)));
    }

    #[test]
    fn test_negative_serials() {
        assert_eq!(to_oa_date(&dt(1899, 12, 29, 6, 0, 0)), -1.25);
        assert_eq!(from_oa_date(-1.25), Some(dt(1899, 12, 29, 6, 0, 0)));
        assert_eq!(to_oa_date(&dt(1899, 12, 29, 0, 0, 0)), -1.0);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(from_oa_date(f64::NAN), None);
        assert_eq!(from_oa_date(MAX_SERIAL), None);
        assert_eq!(from_oa_date(MIN_SERIAL), None);
    }

    #[test]
    fn test_roundtrip_to_the_second() {
        for value in [
            dt(1999, 12, 31, 23, 59, 59),
            dt(2024, 2, 29, 13, 37, 1),
            dt(1850, 6, 15, 8, 30, 0),
        ] {
            assert_eq!(from_oa_date(to_oa_date(&value)), Some(value));
        }
    }
}
