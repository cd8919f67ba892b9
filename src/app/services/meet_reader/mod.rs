//! Reader for HyTek meet-management databases
//!
//! Pulls the meet configuration row and every athlete entry out of a meet
//! database and converts them into [`MeetHeader`](crate::MeetHeader) and
//! [`EntryRecord`](crate::EntryRecord) values with times in centiseconds.
//!
//! - [`source`] - Connector/session traits and text result tables
//! - [`access`] - ODBC backend for `.mdb` files
//! - [`queries`] - The fixed SQL issued against the database
//! - [`field_parsers`] - Cell conversions
//! - [`reader`] - The reader and its scoped connection guard
//!
//! All calls block the current thread until the driver returns.

pub mod access;
pub mod field_parsers;
pub mod queries;
pub mod reader;
pub mod source;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use access::{AccessConnector, AccessSession, list_drivers};
pub use reader::{MeetConnection, MeetEntriesReader};
pub use source::{MeetConnector, MeetSession, ResultRow, ResultTable};
