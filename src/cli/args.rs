//! Command-line argument definitions for the HyTek ingest tool
//!
//! This module defines the CLI interface using the clap derive API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{MeetDatabaseConfig, ParseOptions};
use crate::constants::DEFAULT_OUTPUT_DIR;
use crate::{Error, Result};

/// CLI arguments for the HyTek ingest tool
///
/// Reads HyTek EV3 event exports and meet databases and writes the
/// normalized records as CSV.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hytek-ingest",
    version,
    about = "Normalize HyTek event exports and meet databases into CSV record sets"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse an EV3 event export into header, events and time standards
    Events(EventsArgs),
    /// Read meet configuration and entries from a meet database
    Meet(MeetArgs),
    /// List installed ODBC drivers
    Drivers,
    /// Convert race times between text and centiseconds
    Time(TimeArgs),
}

#[derive(Debug, Clone, Parser)]
pub struct EventsArgs {
    /// Path of the .ev3 file
    #[arg(value_name = "EV3_FILE")]
    pub ev3_file: PathBuf,

    /// Directory for the generated CSV files
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Reject malformed times and unknown gender codes instead of
    /// zeroing or keeping them
    #[arg(long = "strict")]
    pub strict: bool,
}

impl EventsArgs {
    pub fn parse_options(&self) -> ParseOptions {
        if self.strict {
            ParseOptions::strict()
        } else {
            ParseOptions::default()
        }
    }
}

#[derive(Debug, Clone, Parser)]
pub struct MeetArgs {
    /// Path of the meet database (.mdb)
    #[arg(long = "db", value_name = "MDB_FILE")]
    pub db_path: PathBuf,

    /// Directory for the generated CSV files
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// ODBC driver, overriding HYTEK_ODBC_DRIVER and the default
    #[arg(long = "driver", value_name = "DRIVER")]
    pub driver: Option<String>,

    /// Database password, overriding HYTEK_DB_PASSWORD
    #[arg(long = "password", value_name = "PASSWORD")]
    pub password: Option<String>,
}

impl MeetArgs {
    /// Database settings: defaults, then environment, then flags
    pub fn database_config(&self) -> Result<MeetDatabaseConfig> {
        let mut config = MeetDatabaseConfig::from_env(&self.db_path);
        if let Some(driver) = &self.driver {
            config = config.with_driver(driver.clone());
        }
        if let Some(password) = &self.password {
            config = config.with_password(password.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Parser)]
pub struct TimeArgs {
    /// Times to convert
    #[arg(value_name = "VALUE", required = true)]
    pub values: Vec<String>,

    /// Treat values as centiseconds and render them as race times
    #[arg(long = "to-text")]
    pub to_text: bool,
}

impl Args {
    /// Log level implied by -v/-q
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Check argument combinations clap cannot express
    pub fn validate(&self) -> Result<()> {
        if let Commands::Events(events) = &self.command {
            if events.ev3_file.as_os_str().is_empty() {
                return Err(Error::configuration("EV3 file path must not be empty"));
            }
        }
        Ok(())
    }
}
