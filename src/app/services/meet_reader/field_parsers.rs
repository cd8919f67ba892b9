//! Cell parsing utilities for meet database results
//!
//! The driver hands every value back as text; these helpers turn that text
//! into the typed fields of the meet records, naming the column and row in
//! every error.

use chrono::{NaiveDate, NaiveDateTime};

use super::source::ResultRow;
use crate::app::models::{Centiseconds, Course};
use crate::constants::{DB_DATE_FORMATS, DB_DATETIME_FORMATS};
use crate::{Error, Result};

fn invalid(row: &ResultRow<'_>, column: &str, value: &str, expected: &str) -> Error {
    Error::data_validation(format!(
        "Invalid {} for {} in row {}: '{}'",
        expected,
        column,
        row.index(),
        value
    ))
}

/// Trimmed text; NULL reads as empty
pub fn text(row: &ResultRow<'_>, column: &str) -> String {
    row.get(column).map(str::trim).unwrap_or_default().to_string()
}

/// Parse a number the driver may render with a fractional part, rounding
/// away residue such as `6523.9999999`
fn parse_number(value: &str) -> Option<i64> {
    let value = value.trim();
    value.parse::<i64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .map(|number| number.round() as i64)
    })
}

/// Optional integer; NULL or blank is `None`
pub fn optional_integer(row: &ResultRow<'_>, column: &str) -> Result<Option<i32>> {
    match row.get(column).map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_number(value)
            .and_then(|number| i32::try_from(number).ok())
            .map(Some)
            .ok_or_else(|| invalid(row, column, value, "integer")),
    }
}

/// Non-negative whole number; NULL or blank coerces to 0
pub fn non_negative(row: &ResultRow<'_>, column: &str) -> Result<u32> {
    match row.get(column).map(str::trim) {
        None | Some("") => Ok(0),
        Some(value) => parse_number(value)
            .and_then(|number| u32::try_from(number).ok())
            .ok_or_else(|| invalid(row, column, value, "non-negative integer")),
    }
}

/// Seed time already scaled to centiseconds by the query; NULL coerces to 0
pub fn centiseconds(row: &ResultRow<'_>, column: &str) -> Result<Centiseconds> {
    non_negative(row, column)
}

/// Yes/No column. NULL or blank is false.
pub fn flag(row: &ResultRow<'_>, column: &str) -> Result<bool> {
    match row.get(column).map(str::trim) {
        None | Some("") => Ok(false),
        Some(value) => match value.to_ascii_lowercase().as_str() {
            "1" | "-1" | "true" | "yes" | "y" | "t" => Ok(true),
            "0" | "false" | "no" | "n" | "f" => Ok(false),
            _ => Err(invalid(row, column, value, "yes/no flag")),
        },
    }
}

/// Course code column; NULL or blank is `None`
pub fn course(row: &ResultRow<'_>, column: &str) -> Result<Option<Course>> {
    match row.get(column).map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Course::from_code(value)
            .map(Some)
            .ok_or_else(|| invalid(row, column, value, "course code")),
    }
}

/// Date or date/time column reduced to its date; NULL or blank is `None`
pub fn date(row: &ResultRow<'_>, column: &str) -> Result<Option<NaiveDate>> {
    match row.get(column).map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_db_date(value)
            .map(Some)
            .ok_or_else(|| invalid(row, column, value, "date")),
    }
}

/// Parse a driver-rendered date, with or without a time part
pub fn parse_db_date(value: &str) -> Option<NaiveDate> {
    DB_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|datetime| datetime.date())
        .or_else(|| {
            DB_DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        })
}
