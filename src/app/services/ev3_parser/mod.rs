//! EV3 parser for HyTek event/time-standard exports
//!
//! An EV3 file is semicolon-delimited, unquoted UTF-8 text. The first line is
//! a single meet header record; every following line describes one event,
//! including its qualifying and de-qualifying standards per course.
//!
//! ## Architecture
//!
//! - [`layout`] - Named, typed column schemas for header and event records
//! - [`field_parsers`] - Per-column transforms and typed access by name
//! - [`parser`] - File reading and record assembly
//! - [`projection`] - Fan-out of event rows into per-course time standards
//!
//! ## Usage
//!
//! ```no_run
//! use hytek_ingest::app::services::ev3_parser::Ev3Parser;
//! use hytek_ingest::ParseOptions;
//!
//! # fn example() -> hytek_ingest::Result<()> {
//! let parser = Ev3Parser::new(ParseOptions::default());
//! let ev3 = parser.parse_file(std::path::Path::new("Meet Events.ev3"))?;
//! let standards = ev3.time_standards();
//!
//! println!("{} events, {} standards", ev3.events.len(), standards.len());
//! # Ok(())
//! # }
//! ```

pub mod field_parsers;
pub mod layout;
pub mod parser;
pub mod projection;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use layout::{EVENT_LAYOUT, FieldKind, HEADER_LAYOUT, RecordLayout};
pub use parser::{Ev3File, Ev3Parser};
pub use projection::project_time_standards;
