//! Predicates for date, datetime and timestamp values
//!
//! Date strings are checked by a round trip: the input is parsed with the
//! expected layout and formatted again, and only an exact match is accepted.
//! This rejects out-of-range fields (`2020-13-56`) as well as alternative
//! spellings that a lenient parser would normalize (`2020-1-1`). Leap seconds
//! (`:60`) are rejected. Years are four digits, `0000` through `9999`.

use crate::constants::{DATETIME_FORMAT, DATE_FORMAT, TIMESTAMP_MAX, TIMESTAMP_MIN};
use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// Check that `s` is a `YYYY-MM-DD` date, year `0000` through `9999`
pub fn is_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map(|date| date.format(DATE_FORMAT).to_string() == s)
        .unwrap_or(false)
}

/// Check that `s` is a `YYYY-MM-DD HH:MM:SS` datetime
pub fn is_datetime(s: &str) -> bool {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .map(|datetime| {
            // chrono stores a leap second as nanoseconds past 1e9
            datetime.nanosecond() < 1_000_000_000
                && datetime.format(DATETIME_FORMAT).to_string() == s
        })
        .unwrap_or(false)
}

/// Check that `n` fits the signed 32-bit epoch range `[0, 2147483647]`
pub fn is_timestamp(n: i64) -> bool {
    (TIMESTAMP_MIN..=TIMESTAMP_MAX).contains(&n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_date() {
        assert!(is_date("2020-01-01"));
        assert!(is_date("2024-02-29"));
        assert!(!is_date("2020-13-56"));
        assert!(!is_date("2023-02-29"));
        assert!(!is_date("2020-1-1"));
        assert!(!is_date("2021/01/01"));
        assert!(!is_date("2020-01-01 00:00:00"));
        assert!(!is_date(""));
        assert!(is_date("0000-01-01"));
        assert!(is_date("9999-12-31"));
        assert!(!is_date("10000-01-01"));
    }

    #[test]
    fn test_is_datetime() {
        assert!(is_datetime("2000-01-01 00:00:00"));
        assert!(is_datetime("2021-12-31 23:59:59"));
        assert!(!is_datetime("1919-01-01 00:90:00"));
        assert!(!is_datetime("2000-01-01"));
        assert!(!is_datetime("2000-01-01T00:00:00"));
        assert!(!is_datetime("2000-01-01 0:00:00"));
        assert!(!is_datetime("2020-01-01 12:34:60"));
        assert!(!is_datetime("2016-12-31 23:59:60"));
    }

    #[test]
    fn test_is_timestamp_bounds() {
        assert!(!is_timestamp(-1));
        assert!(is_timestamp(0));
        assert!(is_timestamp(1_611_150_603));
        assert!(is_timestamp(2_147_483_647));
        assert!(!is_timestamp(2_147_483_648));
    }
}
