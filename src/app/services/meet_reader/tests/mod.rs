//! Test utilities and mock infrastructure for meet reader testing
//!
//! Provides an in-memory connector that answers the fixed queries with
//! canned tables and counts how many sessions were opened and released.

use std::cell::Cell;
use std::rc::Rc;

use crate::app::services::meet_reader::queries::{
    ENTRIES_COLUMNS, ENTRIES_SQL, MEET_INFO_COLUMNS, MEET_INFO_SQL,
};
use crate::app::services::meet_reader::source::{MeetConnector, MeetSession, ResultTable};
use crate::{Error, Result};

// Test modules
mod field_parser_tests;

/// Shared open/close counters
#[derive(Debug, Default)]
pub struct SessionCounters {
    pub opened: Cell<usize>,
    pub released: Cell<usize>,
    pub queries: Cell<usize>,
}

/// In-memory meet database
#[derive(Debug, Clone)]
pub struct MockConnector {
    pub meet_info: ResultTable,
    pub entries: ResultTable,
    pub fail_connect: bool,
    pub counters: Rc<SessionCounters>,
}

impl MockConnector {
    pub fn new(meet_info: ResultTable, entries: ResultTable) -> Self {
        Self {
            meet_info,
            entries,
            fail_connect: false,
            counters: Rc::new(SessionCounters::default()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            fail_connect: true,
            ..Self::new(ResultTable::default(), ResultTable::default())
        }
    }
}

impl MeetConnector for MockConnector {
    type Session = MockSession;

    fn connect(&self) -> Result<MockSession> {
        if self.fail_connect {
            return Err(Error::database_connection("mock database unreachable", None));
        }
        self.counters.opened.set(self.counters.opened.get() + 1);
        Ok(MockSession {
            connector: self.clone(),
        })
    }

    fn describe(&self) -> String {
        "mock.mdb".to_string()
    }
}

pub struct MockSession {
    connector: MockConnector,
}

impl MeetSession for MockSession {
    fn query(&mut self, label: &str, sql: &str) -> Result<ResultTable> {
        let counters = &self.connector.counters;
        counters.queries.set(counters.queries.get() + 1);

        if sql == MEET_INFO_SQL {
            Ok(self.connector.meet_info.clone())
        } else if sql == ENTRIES_SQL {
            Ok(self.connector.entries.clone())
        } else {
            Err(Error::query(label, "unknown query", None))
        }
    }
}

impl Drop for MockSession {
    fn drop(&mut self) {
        let counters = &self.connector.counters;
        counters.released.set(counters.released.get() + 1);
    }
}

fn table(columns: &[&str], rows: Vec<Vec<Option<&str>>>) -> ResultTable {
    ResultTable::new(
        columns.iter().map(|c| c.to_string()).collect(),
        rows.into_iter()
            .map(|row| row.into_iter().map(|cell| cell.map(str::to_string)).collect())
            .collect(),
    )
}

/// Meet table with one configuration row
pub fn meet_info_table() -> ResultTable {
    table(
        MEET_INFO_COLUMNS,
        vec![vec![
            Some("2024 Western Region SC Championships"),
            Some("2024-02-23 00:00:00"),
            Some("2024-02-25 00:00:00"),
            Some("2024-12-31 00:00:00"),
            Some("SLY"),
            None,
        ]],
    )
}

/// One entry row in result-column order, with overridable seed time cells
pub fn entry_row(
    last_name: &'static str,
    event_dist: Option<&'static str>,
    actual_seed: Option<&'static str>,
    conv_seed: Option<&'static str>,
) -> Vec<Option<&'static str>> {
    vec![
        Some("WRSC"),
        Some(last_name),
        Some("Alex"),
        Some("ABC123"),
        Some("F"),
        Some("2010-05-03 00:00:00"),
        Some("13"),
        Some("12"),
        Some("I"),
        event_dist,
        Some("A"),
        Some("13"),
        Some("N"),
        Some("S"),
        actual_seed,
        Some("L"),
        conv_seed,
        Some("0"),
        Some("1"),
        Some(""),
        None,
    ]
}

/// Entries table from rows built with [`entry_row`]
pub fn entries_table(rows: Vec<Vec<Option<&'static str>>>) -> ResultTable {
    table(ENTRIES_COLUMNS, rows)
}
