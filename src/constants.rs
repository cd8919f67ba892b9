//! Application constants for the HyTek ingestion layer
//!
//! This module contains sentinels, default values and fixed names used
//! throughout the parsers, the database reader and the CLI.

// =============================================================================
// Time Encoding
// =============================================================================

/// Text sentinel meaning "no standard defined" in EV3 time columns
pub const NO_STANDARD_TEXT: &str = "0.00";

/// Literal produced when a time value cannot be formatted and the caller
/// asked for the fallback
pub const FORMAT_FALLBACK: &str = "0:00.00";

/// Centiseconds per second
pub const CENTISECONDS_PER_SECOND: u32 = 100;

/// Centiseconds per minute
pub const CENTISECONDS_PER_MINUTE: u32 = 60 * CENTISECONDS_PER_SECOND;

// =============================================================================
// EV3 Event Export
// =============================================================================

/// Field delimiter of the EV3 export
pub const EV3_DELIMITER: u8 = b';';

/// Date format of slash-separated EV3 dates with a four digit year
pub const EV3_SLASH_DATE_FORMAT: &str = "%m/%d/%Y";

/// Date format of slash-separated EV3 dates with a two digit year
pub const EV3_SHORT_SLASH_DATE_FORMAT: &str = "%m/%d/%y";

/// Date format of slash-separated EV3 dates written year first
pub const EV3_YEAR_FIRST_SLASH_DATE_FORMAT: &str = "%Y/%m/%d";

/// ISO date format
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Compact date format used by SDIF-style files
pub const COMPACT_DATE_FORMAT: &str = "%Y%m%d";

/// Gender letters folded into male
pub const MALE_GENDER_CODES: &[&str] = &["M", "B"];

/// Gender letters folded into female
pub const FEMALE_GENDER_CODES: &[&str] = &["F", "W", "G"];

// =============================================================================
// Meet Database
// =============================================================================

/// Default ODBC driver for HyTek `.mdb` files
pub const DEFAULT_ODBC_DRIVER: &str = "{Microsoft Access Driver (*.mdb, *.accdb)}";

/// Environment variable holding the meet database password
pub const DB_PASSWORD_ENV: &str = "HYTEK_DB_PASSWORD";

/// Environment variable overriding the ODBC driver
pub const ODBC_DRIVER_ENV: &str = "HYTEK_ODBC_DRIVER";

/// Date/time formats returned by the driver for date columns, tried in order
pub const DB_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Plain date formats returned by the driver, tried after the date/time ones
pub const DB_DATE_FORMATS: &[&str] = &[ISO_DATE_FORMAT, EV3_SLASH_DATE_FORMAT];

// =============================================================================
// Export File Names
// =============================================================================

/// EV3 header export
pub const EV3_HEADER_FILE: &str = "ev3_header.csv";

/// EV3 event rows export
pub const EV3_EVENTS_FILE: &str = "ev3_events.csv";

/// Course-projected time standards export
pub const TIME_STANDARDS_FILE: &str = "time_standards.csv";

/// Meet configuration export
pub const MEET_INFO_FILE: &str = "meet_info.csv";

/// Athlete entries export
pub const ENTRIES_FILE: &str = "entries_info.csv";

/// Default output directory for the CLI
pub const DEFAULT_OUTPUT_DIR: &str = "./output";
