//! Race time encoding
//!
//! Converts between human-readable race times (`M:SS.CC` / `SS.CC`) and exact
//! integer centiseconds. Parsing and formatting both come in a strict form
//! returning [`TimeCodecError`] and a lenient form that maps failures onto
//! the zero sentinel or the [`FORMAT_FALLBACK`] literal.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::app::models::Centiseconds;
use crate::constants::{CENTISECONDS_PER_MINUTE, CENTISECONDS_PER_SECOND, FORMAT_FALLBACK};

/// `[minutes:]seconds.hundredths`, seconds one or two digits, hundredths exactly two
static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+):)?(\d{1,2})\.(\d{2})$").expect("time pattern is a valid regex")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeCodecError {
    #[error("'{input}' is not a race time of the form [M:]SS.CC")]
    InvalidFormat { input: String },

    #[error("'{input}' is not a whole number of centiseconds")]
    NotNumeric { input: String },

    #[error("time value {value} is negative")]
    Negative { value: i64 },

    #[error("'{input}' exceeds the representable time range")]
    OutOfRange { input: String },
}

/// Parse race time text into centiseconds.
///
/// `total = hundredths + 100 * seconds + 6000 * minutes`, minutes defaulting to zero.
pub fn parse_time(text: &str) -> Result<Centiseconds, TimeCodecError> {
    let captures = TIME_PATTERN
        .captures(text)
        .ok_or_else(|| TimeCodecError::InvalidFormat {
            input: text.to_string(),
        })?;

    let out_of_range = || TimeCodecError::OutOfRange {
        input: text.to_string(),
    };

    let minutes = match captures.get(1) {
        Some(m) => m.as_str().parse::<u32>().map_err(|_| out_of_range())?,
        None => 0,
    };
    // Both groups are bounded to two digits by the pattern
    let seconds: u32 = captures[2].parse().map_err(|_| out_of_range())?;
    let hundredths: u32 = captures[3].parse().map_err(|_| out_of_range())?;

    minutes
        .checked_mul(CENTISECONDS_PER_MINUTE)
        .and_then(|total| total.checked_add(seconds * CENTISECONDS_PER_SECOND + hundredths))
        .ok_or_else(out_of_range)
}

/// Parse race time text, mapping anything malformed to the zero sentinel.
///
/// Callers using this form cannot tell "no time" from "bad time".
pub fn parse_time_or_zero(text: &str) -> Centiseconds {
    parse_time(text).unwrap_or(0)
}

/// Render centiseconds as `M:SS.CC`, or `SS.CC` below one minute.
pub fn format_time(value: Centiseconds) -> String {
    let hundredths = value % CENTISECONDS_PER_SECOND;
    let seconds = (value / CENTISECONDS_PER_SECOND) % 60;
    let minutes = value / CENTISECONDS_PER_MINUTE;

    if minutes > 0 {
        format!("{}:{:02}.{:02}", minutes, seconds, hundredths)
    } else {
        format!("{:02}.{:02}", seconds, hundredths)
    }
}

/// Format a time value that arrives as text, e.g. a cell of a loaded table.
pub fn format_time_value(value: &str) -> Result<String, TimeCodecError> {
    let trimmed = value.trim();
    let number: i64 = trimmed.parse().map_err(|_| TimeCodecError::NotNumeric {
        input: value.to_string(),
    })?;
    if number < 0 {
        return Err(TimeCodecError::Negative { value: number });
    }
    let centiseconds = Centiseconds::try_from(number).map_err(|_| TimeCodecError::OutOfRange {
        input: value.to_string(),
    })?;
    Ok(format_time(centiseconds))
}

/// Format a textual time value, falling back to `"0:00.00"` on any failure.
pub fn format_time_value_or_default(value: &str) -> String {
    format_time_value(value).unwrap_or_else(|_| FORMAT_FALLBACK.to_string())
}

/// Map a HyTek stroke letter to its name. Unknown letters are IM.
pub fn stroke_name(code: &str) -> &'static str {
    match code.trim() {
        "A" => "Free",
        "B" => "Back",
        "C" => "Breast",
        "D" => "Fly",
        _ => "IM",
    }
}
