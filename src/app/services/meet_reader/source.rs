//! Connector and session abstractions over the meet database
//!
//! A [`MeetConnector`] opens sessions; a [`MeetSession`] runs SQL and returns
//! the whole result as text cells. Typed conversion happens above this seam,
//! so any backend that can produce text rows can feed the reader.

use std::collections::HashMap;

use crate::{Error, Result};

/// Opens live sessions against one meet database
pub trait MeetConnector {
    type Session: MeetSession;

    /// Open a new session. Fails with [`Error::DatabaseConnection`] when the
    /// database cannot be reached.
    fn connect(&self) -> Result<Self::Session>;

    /// Label used in log messages
    fn describe(&self) -> String;
}

/// A live session; dropping it releases the underlying connection
pub trait MeetSession {
    /// Execute a query and fetch all of its rows
    fn query(&mut self, label: &str, sql: &str) -> Result<ResultTable>;
}

/// Rows of a query result, every cell as optional text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    columns: Vec<String>,
    name_to_index: HashMap<String, usize>,
    rows: Vec<Vec<Option<String>>>,
}

impl ResultTable {
    /// Build a table; column names are matched case-insensitively
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let name_to_index = columns
            .iter()
            .enumerate()
            .map(|(index, name)| (name.trim().to_ascii_lowercase(), index))
            .collect();

        Self {
            columns,
            name_to_index,
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(&name.to_ascii_lowercase()).copied()
    }

    /// Fail unless every named column is present
    pub fn require_columns(&self, label: &str, names: &[&str]) -> Result<()> {
        let missing: Vec<&str> = names
            .iter()
            .copied()
            .filter(|name| self.column_index(name).is_none())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::query(
                label,
                format!("result is missing columns: {}", missing.join(", ")),
                None,
            ))
        }
    }

    /// Iterate rows with by-name cell access
    pub fn rows(&self) -> impl Iterator<Item = ResultRow<'_>> {
        self.rows
            .iter()
            .enumerate()
            .map(move |(index, cells)| ResultRow {
                table: self,
                cells,
                index,
            })
    }
}

/// Borrowed view of one result row
#[derive(Debug, Clone, Copy)]
pub struct ResultRow<'a> {
    table: &'a ResultTable,
    cells: &'a [Option<String>],
    index: usize,
}

impl<'a> ResultRow<'a> {
    /// Zero-based row number within the result
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cell text by column name; `None` for NULL or an unknown column
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.table
            .column_index(name)
            .and_then(|index| self.cells.get(index))
            .and_then(|cell| cell.as_deref())
    }
}
