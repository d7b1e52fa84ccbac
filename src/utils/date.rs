//! Helpers for the ISO "YYYY-MM-DD" date format the store uses.

use chrono::{Datelike, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
}

/// Two-digit month and four-digit year, the shape the monthly filters bind
/// against `strftime('%m', ...)` / `strftime('%Y', ...)`.
pub fn month_key(date: NaiveDate) -> (String, String) {
    month_key_for(date.month(), date.year())
}

pub fn month_key_for(month: u32, year: i32) -> (String, String) {
    (format!("{:02}", month), year.to_string())
}

/// Last calendar day of the given month. None for an out-of-range month.
pub fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).and_then(|d| d.pred_opt())
}
