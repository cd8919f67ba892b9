//! ODBC backend for HyTek `.mdb` meet databases
//!
//! Connects through the Microsoft Access ODBC driver (or any driver named in
//! the configuration) and fetches query results as text.

use odbc_api::{Connection, ConnectionOptions, Cursor, Environment, ResultSetMetadata};
use std::sync::OnceLock;
use tracing::{debug, info};

use super::source::{MeetConnector, MeetSession, ResultTable};
use crate::config::MeetDatabaseConfig;
use crate::{Error, Result};

/// Process-wide ODBC environment, created on first use
static ENVIRONMENT: OnceLock<Environment> = OnceLock::new();

fn environment() -> Result<&'static Environment> {
    if let Some(environment) = ENVIRONMENT.get() {
        return Ok(environment);
    }

    let environment = Environment::new().map_err(|e| {
        Error::database_connection("Failed to create ODBC environment", Some(Box::new(e)))
    })?;
    Ok(ENVIRONMENT.get_or_init(|| environment))
}

/// Names of the ODBC drivers installed on this machine
pub fn list_drivers() -> Result<Vec<String>> {
    let drivers = environment()?.drivers().map_err(|e| {
        Error::database_connection("Failed to enumerate ODBC drivers", Some(Box::new(e)))
    })?;

    Ok(drivers
        .into_iter()
        .map(|driver| driver.description)
        .collect())
}

/// Opens ODBC sessions against one meet database file
#[derive(Debug, Clone)]
pub struct AccessConnector {
    config: MeetDatabaseConfig,
}

impl AccessConnector {
    pub fn new(config: MeetDatabaseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MeetDatabaseConfig {
        &self.config
    }
}

impl MeetConnector for AccessConnector {
    type Session = AccessSession;

    fn connect(&self) -> Result<AccessSession> {
        self.config.validate()?;

        let db_path = self.config.db_path();
        if !db_path.is_file() {
            return Err(Error::database_connection(
                format!("Meet database not found: {}", db_path.display()),
                None,
            ));
        }

        let connection = environment()?
            .connect_with_connection_string(
                &self.config.connection_string(),
                ConnectionOptions::default(),
            )
            .map_err(|e| {
                Error::database_connection(
                    format!("Failed to open {}", db_path.display()),
                    Some(Box::new(e)),
                )
            })?;

        info!("Opened meet database {}", db_path.display());
        Ok(AccessSession { connection })
    }

    fn describe(&self) -> String {
        self.config.db_path().display().to_string()
    }
}

/// Live ODBC connection; disconnects when dropped
pub struct AccessSession {
    connection: Connection<'static>,
}

impl MeetSession for AccessSession {
    fn query(&mut self, label: &str, sql: &str) -> Result<ResultTable> {
        let query_error = |message: &str, e: odbc_api::Error| {
            Error::query(label, message, Some(Box::new(e)))
        };

        let cursor = self
            .connection
            .execute(sql, ())
            .map_err(|e| query_error("execution failed", e))?;

        let Some(mut cursor) = cursor else {
            debug!("Query '{}' produced no result set", label);
            return Ok(ResultTable::default());
        };

        let columns = cursor
            .column_names()
            .map_err(|e| query_error("failed to describe columns", e))?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(|e| query_error("failed to read column names", e))?;

        let column_count = u16::try_from(columns.len())
            .map_err(|_| Error::query(label, "too many result columns", None))?;

        let mut rows = Vec::new();
        let mut buffer = Vec::new();
        while let Some(mut row) = cursor
            .next_row()
            .map_err(|e| query_error("failed to fetch row", e))?
        {
            let mut cells = Vec::with_capacity(columns.len());
            for column in 1..=column_count {
                buffer.clear();
                let present = row
                    .get_wide_text(column, &mut buffer)
                    .map_err(|e| query_error("failed to read cell", e))?;
                let cell = if present {
                    Some(decode_wide_cell(label, &buffer)?)
                } else {
                    None
                };
                cells.push(cell);
            }
            rows.push(cells);
        }

        debug!("Query '{}' returned {} rows", label, rows.len());
        Ok(ResultTable::new(columns, rows))
    }
}

/// Decode a cell fetched in the driver's wide (UTF-16) encoding
fn decode_wide_cell(label: &str, buffer: &[u16]) -> Result<String> {
    String::from_utf16(buffer)
        .map_err(|e| Error::query(label, "invalid UTF-16 in cell", Some(Box::new(e))))
}
