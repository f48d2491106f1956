//! Date parsing and calendar arithmetic
//!
//! Caller-supplied dates must be exactly `YYYY-MM-DD`. chrono's `%Y-%m-%d`
//! alone also accepts unpadded fields and signed years, so the shape is
//! checked byte by byte before the calendar check.

use crate::query::{DateField, QueryError, QueryResult};
use chrono::{Datelike, Days, NaiveDate};

/// The only accepted date layout
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the rolling observation window, in calendar months
pub const ROLLING_WINDOW_MONTHS: u32 = 12;

/// Parse a `YYYY-MM-DD` string, attributing failures to `field`
pub fn parse_date(field: DateField, input: &str) -> QueryResult<NaiveDate> {
    let invalid = || QueryError::InvalidDate {
        field,
        input: input.to_string(),
    };

    let well_formed = input.len() == 10
        && input.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| invalid())
}

/// Subtract calendar months from a date.
///
/// A day that does not exist in the target month rolls forward into the
/// next one, so 2016-02-29 minus 12 months is 2015-03-01. Saturates at
/// `NaiveDate::MIN`.
pub fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 - months as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_days(Days::new(u64::from(date.day0()))))
        .unwrap_or(NaiveDate::MIN)
}

/// First date of the rolling window ending at `latest`
pub fn rolling_window_start(latest: NaiveDate) -> NaiveDate {
    months_before(latest, ROLLING_WINDOW_MONTHS)
}
