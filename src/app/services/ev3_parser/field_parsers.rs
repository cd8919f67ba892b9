//! Field parsing utilities for EV3 records
//!
//! Applies each column's declared [`FieldKind`] transform to a raw record and
//! exposes the converted values by column name.

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::warn;

use super::layout::{ColumnSpec, FieldKind, RecordLayout};
use crate::app::models::{Centiseconds, Gender};
use crate::app::services::time_codec::{parse_time, parse_time_or_zero};
use crate::config::{GenderPolicy, ParseOptions, TimeParseMode};
use crate::constants::{
    COMPACT_DATE_FORMAT, EV3_SHORT_SLASH_DATE_FORMAT, EV3_SLASH_DATE_FORMAT,
    EV3_YEAR_FIRST_SLASH_DATE_FORMAT, ISO_DATE_FORMAT, NO_STANDARD_TEXT,
};
use crate::{Error, Result};

/// A single converted field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i32),
    Count(Option<u32>),
    Time {
        text: String,
        centiseconds: Centiseconds,
    },
    Gender(Gender),
    Date(Option<NaiveDate>),
}

/// A record converted according to its layout
#[derive(Debug, Clone)]
pub struct ParsedRow {
    layout: &'static RecordLayout,
    values: Vec<FieldValue>,
    line: u64,
}

/// Convert a raw record with the transforms its layout declares
pub fn parse_row(
    layout: &'static RecordLayout,
    record: &StringRecord,
    line: u64,
    options: &ParseOptions,
) -> Result<ParsedRow> {
    let field_count = layout.check_field_count(record, line)?;

    let values = layout
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            // Optional trailing columns missing from the record read as blank
            let raw = if index < field_count {
                record.get(index).unwrap_or_default()
            } else {
                ""
            };
            parse_field(column, raw.trim(), line, options)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ParsedRow {
        layout,
        values,
        line,
    })
}

fn parse_field(
    column: &ColumnSpec,
    raw: &str,
    line: u64,
    options: &ParseOptions,
) -> Result<FieldValue> {
    match column.kind {
        FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
        FieldKind::Integer => raw.parse::<i32>().map(FieldValue::Integer).map_err(|e| {
            Error::data_validation(format!(
                "Invalid integer for {} at line {}: '{}' ({})",
                column.name, line, raw, e
            ))
        }),
        FieldKind::Count if raw.is_empty() => Ok(FieldValue::Count(None)),
        FieldKind::Count => raw
            .parse::<u32>()
            .map(|count| FieldValue::Count(Some(count)))
            .map_err(|e| {
                Error::data_validation(format!(
                    "Invalid count for {} at line {}: '{}' ({})",
                    column.name, line, raw, e
                ))
            }),
        FieldKind::Time => parse_time_field(column, raw, line, options.time_mode),
        FieldKind::Gender => parse_gender_field(column, raw, line, options.gender_policy),
        FieldKind::Date => parse_ev3_date(raw)
            .map(FieldValue::Date)
            .map_err(|e| match e {
                Error::DateTimeParsing { source, .. } => Error::datetime_parsing(
                    format!("Invalid date for {} at line {}: '{}'", column.name, line, raw),
                    source,
                ),
                other => other,
            }),
    }
}

fn parse_time_field(
    column: &ColumnSpec,
    raw: &str,
    line: u64,
    mode: TimeParseMode,
) -> Result<FieldValue> {
    // A blank cell and an explicit zero standard are the same thing
    let text = if raw.is_empty() { NO_STANDARD_TEXT } else { raw };

    let centiseconds = match mode {
        TimeParseMode::Lenient => parse_time_or_zero(text),
        TimeParseMode::Strict => parse_time(text).map_err(|e| {
            Error::data_validation(format!("{} at line {}: {}", column.name, line, e))
        })?,
    };

    Ok(FieldValue::Time {
        text: text.to_string(),
        centiseconds,
    })
}

fn parse_gender_field(
    column: &ColumnSpec,
    raw: &str,
    line: u64,
    policy: GenderPolicy,
) -> Result<FieldValue> {
    let gender = Gender::normalize(raw);
    if !gender.is_recognized() {
        match policy {
            GenderPolicy::PassThrough => {
                warn!(
                    "Unrecognized {} code '{}' at line {} kept as-is",
                    column.name, raw, line
                );
            }
            GenderPolicy::Strict => {
                return Err(Error::data_validation(format!(
                    "Unrecognized {} code '{}' at line {}",
                    column.name, raw, line
                )));
            }
        }
    }
    Ok(FieldValue::Gender(gender))
}

/// Parse an EV3 date cell. Blank cells are `None`.
///
/// Slash dates are month first with a two or four digit year, or year first
/// when they open with four digits; dashed dates are ISO; eight bare digits
/// are `YYYYMMDD`.
pub fn parse_ev3_date(raw: &str) -> Result<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let format = if raw.contains('/') {
        if raw.split('/').next().is_some_and(|first| first.len() == 4) {
            EV3_YEAR_FIRST_SLASH_DATE_FORMAT
        } else {
            match raw.rsplit('/').next() {
                Some(year) if year.len() == 2 => EV3_SHORT_SLASH_DATE_FORMAT,
                _ => EV3_SLASH_DATE_FORMAT,
            }
        }
    } else if raw.contains('-') {
        ISO_DATE_FORMAT
    } else {
        COMPACT_DATE_FORMAT
    };

    NaiveDate::parse_from_str(raw, format)
        .map(Some)
        .map_err(|e| Error::datetime_parsing(format!("Invalid date '{}'", raw), e))
}

impl ParsedRow {
    /// Source line the row came from
    pub fn line(&self) -> u64 {
        self.line
    }

    fn value(&self, name: &str) -> Result<&FieldValue> {
        self.layout
            .index_of(name)
            .and_then(|index| self.values.get(index))
            .ok_or_else(|| {
                Error::data_validation(format!(
                    "Column '{}' is not part of the {} layout",
                    name, self.layout.name
                ))
            })
    }

    fn kind_mismatch(&self, name: &str, expected: &str) -> Error {
        Error::data_validation(format!(
            "Column '{}' of the {} layout is not a {} column",
            name, self.layout.name, expected
        ))
    }

    pub fn text(&self, name: &str) -> Result<String> {
        match self.value(name)? {
            FieldValue::Text(text) => Ok(text.clone()),
            _ => Err(self.kind_mismatch(name, "text")),
        }
    }

    pub fn integer(&self, name: &str) -> Result<i32> {
        match self.value(name)? {
            FieldValue::Integer(value) => Ok(*value),
            _ => Err(self.kind_mismatch(name, "integer")),
        }
    }

    /// Whole number, `None` when the cell was blank
    pub fn count(&self, name: &str) -> Result<Option<u32>> {
        match self.value(name)? {
            FieldValue::Count(value) => Ok(*value),
            _ => Err(self.kind_mismatch(name, "count")),
        }
    }

    /// Time text (blank already defaulted) and its centiseconds
    pub fn time(&self, name: &str) -> Result<(String, Centiseconds)> {
        match self.value(name)? {
            FieldValue::Time { text, centiseconds } => Ok((text.clone(), *centiseconds)),
            _ => Err(self.kind_mismatch(name, "time")),
        }
    }

    pub fn gender(&self, name: &str) -> Result<Gender> {
        match self.value(name)? {
            FieldValue::Gender(gender) => Ok(gender.clone()),
            _ => Err(self.kind_mismatch(name, "gender")),
        }
    }

    pub fn date(&self, name: &str) -> Result<Option<NaiveDate>> {
        match self.value(name)? {
            FieldValue::Date(date) => Ok(*date),
            _ => Err(self.kind_mismatch(name, "date")),
        }
    }
}
