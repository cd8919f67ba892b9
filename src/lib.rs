//! HyTek Ingest Library
//!
//! A Rust library for reading swim-meet data out of two HyTek sources and
//! normalizing it into strongly-typed records for entry-time validation.
//!
//! This library provides tools for:
//! - Converting race times between text and exact integer centiseconds
//! - Parsing semicolon-delimited `.ev3` event exports against fixed column schemas
//! - Projecting per-course qualifying standards out of event rows
//! - Reading meet configuration and athlete entries from a meet database over ODBC
//! - Exporting any record set to CSV

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod csv_export;
        pub mod ev3_parser;
        pub mod meet_reader;
        pub mod time_codec;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    Centiseconds, Course, EntryRecord, EventHeaderRecord, EventRecord, Gender, MeetHeader,
    TimeStandardRecord,
};
pub use app::services::time_codec::TimeCodecError;
pub use config::{MeetDatabaseConfig, ParseOptions};

/// Result type alias for the ingestion layer
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for every way a source can fail to be read
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV reading or writing error
    #[error("CSV error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// EV3 content error other than a column-count mismatch
    #[error("EV3 format error in file '{file}': {message}")]
    Ev3Format { file: String, message: String },

    /// A record did not carry the number of fields its layout declares
    #[error(
        "Schema mismatch in {layout} record at line {line}: expected {expected} fields, found {found}"
    )]
    SchemaMismatch {
        layout: String,
        line: u64,
        expected: String,
        found: usize,
    },

    /// A field value could not be converted to its declared type
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Date parsing error
    #[error("Date parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Race time text could not be encoded or decoded
    #[error("Time codec error: {0}")]
    TimeCodec(#[from] TimeCodecError),

    /// The meet database could not be opened
    #[error("Database connection failed: {message}")]
    DatabaseConnection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A query failed to execute or its rows could not be fetched
    #[error("Query '{query}' failed: {message}")]
    Query {
        query: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The meet configuration table holds no row
    #[error("Meet database contains no meet record")]
    MissingMeetRecord,

    /// Export was requested before anything was read
    #[error("No {what} has been read; read it before exporting")]
    NoDataRead { what: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an EV3 format error
    pub fn ev3_format(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Ev3Format {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a schema mismatch error
    pub fn schema_mismatch(
        layout: impl Into<String>,
        line: u64,
        expected: impl Into<String>,
        found: usize,
    ) -> Self {
        Self::SchemaMismatch {
            layout: layout.into(),
            line,
            expected: expected.into(),
            found,
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a date parsing error
    pub fn datetime_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a database connection error
    pub fn database_connection(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::DatabaseConnection {
            message: message.into(),
            source,
        }
    }

    /// Create a query error
    pub fn query(
        query: impl Into<String>,
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Query {
            query: query.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an export-before-read error
    pub fn no_data_read(what: impl Into<String>) -> Self {
        Self::NoDataRead { what: what.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True when the failure happened before any connection existed
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::DatabaseConnection { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV processing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date parsing failed".to_string(),
            source: error,
        }
    }
}
