//! Meet header and entries reader
//!
//! [`MeetEntriesReader::connect`] hands out a [`MeetConnection`] guard that
//! owns one live session. Every query issued through the guard reuses that
//! session, and dropping the guard releases it on every exit path, error
//! paths included. A reader is not meant to be shared between threads; give
//! each concurrent task its own.

use std::path::Path;
use tracing::{debug, info};

use super::field_parsers as cells;
use super::queries::{
    ENTRIES_COLUMNS, ENTRIES_QUERY, ENTRIES_SQL, MEET_INFO_COLUMNS, MEET_INFO_QUERY,
    MEET_INFO_SQL,
};
use super::source::{MeetConnector, MeetSession, ResultRow};
use crate::app::models::{EntryRecord, MeetHeader};
use crate::app::services::csv_export::export_records;
use crate::{Error, Result};

/// Reads meet configuration and entries through a connector
#[derive(Debug, Clone)]
pub struct MeetEntriesReader<C> {
    connector: C,
}

impl<C: MeetConnector> MeetEntriesReader<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Open a session and wrap it in a connection guard
    pub fn connect(&self) -> Result<MeetConnection<C::Session>> {
        let source = self.connector.describe();
        let session = self.connector.connect()?;
        debug!("Connected to meet database {}", source);
        Ok(MeetConnection::new(session, source))
    }
}

/// Scoped handle on a live meet database session
pub struct MeetConnection<S: MeetSession> {
    session: S,
    source: String,
    meet_header: Option<MeetHeader>,
    entries: Option<Vec<EntryRecord>>,
}

impl<S: MeetSession> MeetConnection<S> {
    fn new(session: S, source: String) -> Self {
        Self {
            session,
            source,
            meet_header: None,
            entries: None,
        }
    }

    /// Read the single meet configuration row
    pub fn read_meet_header(&mut self) -> Result<MeetHeader> {
        let table = self.session.query(MEET_INFO_QUERY, MEET_INFO_SQL)?;
        table.require_columns(MEET_INFO_QUERY, MEET_INFO_COLUMNS)?;

        let row = table.rows().next().ok_or(Error::MissingMeetRecord)?;
        let header = meet_header_from_row(&row)?;

        info!("Read meet header '{}' from {}", header.meet_name, self.source);
        self.meet_header = Some(header.clone());
        Ok(header)
    }

    /// Read every athlete entry, one record per athlete and event
    pub fn read_entries(&mut self) -> Result<Vec<EntryRecord>> {
        let table = self.session.query(ENTRIES_QUERY, ENTRIES_SQL)?;
        table.require_columns(ENTRIES_QUERY, ENTRIES_COLUMNS)?;

        let entries = table
            .rows()
            .map(|row| entry_from_row(&row))
            .collect::<Result<Vec<_>>>()?;

        info!("Read {} entries from {}", entries.len(), self.source);
        self.entries = Some(entries.clone());
        Ok(entries)
    }

    /// Header from the most recent [`read_meet_header`](Self::read_meet_header)
    pub fn meet_header(&self) -> Option<&MeetHeader> {
        self.meet_header.as_ref()
    }

    /// Entries from the most recent [`read_entries`](Self::read_entries)
    pub fn entries(&self) -> Option<&[EntryRecord]> {
        self.entries.as_deref()
    }

    /// Write the last header read to CSV
    pub fn export_meet_header(&self, destination: &Path) -> Result<usize> {
        let header = self
            .meet_header
            .as_ref()
            .ok_or_else(|| Error::no_data_read("meet header"))?;
        export_records(std::slice::from_ref(header), destination)
    }

    /// Write the last entries read to CSV
    pub fn export_entries(&self, destination: &Path) -> Result<usize> {
        let entries = self
            .entries
            .as_deref()
            .ok_or_else(|| Error::no_data_read("entries"))?;
        export_records(entries, destination)
    }

    /// Release the session now instead of at end of scope
    pub fn close(self) {}
}

impl<S: MeetSession> Drop for MeetConnection<S> {
    fn drop(&mut self) {
        debug!("Releasing meet database connection to {}", self.source);
    }
}

fn meet_header_from_row(row: &ResultRow<'_>) -> Result<MeetHeader> {
    Ok(MeetHeader {
        meet_name: cells::text(row, "Meet_name"),
        meet_start: cells::date(row, "Meet_start")?,
        meet_end: cells::date(row, "Meet_end")?,
        calc_date: cells::date(row, "Calc_date")?,
        course_order: cells::text(row, "course_order"),
        entry_eligibility_date: cells::date(row, "EntryEligibility_date")?,
    })
}

fn entry_from_row(row: &ResultRow<'_>) -> Result<EntryRecord> {
    Ok(EntryRecord {
        team_abbr: cells::text(row, "Team_abbr"),
        last_name: cells::text(row, "Last_name"),
        first_name: cells::text(row, "First_name"),
        reg_no: cells::text(row, "Reg_no"),
        sex: cells::text(row, "Ath_Sex"),
        birth_date: cells::date(row, "Birth_date")?,
        age: cells::optional_integer(row, "Ath_age")?,
        event_no: cells::text(row, "Event_no"),
        ind_rel: cells::text(row, "Ind_rel"),
        event_dist: cells::non_negative(row, "Event_dist")?,
        stroke_code: cells::text(row, "Event_stroke"),
        min_age: cells::optional_integer(row, "Low_age")?,
        event_type: cells::text(row, "Event_Type"),
        actual_seed_course: cells::course(row, "ActSeed_course")?,
        actual_seed_time_cs: cells::centiseconds(row, "ActualSeed_time")?,
        conv_seed_course: cells::course(row, "ConvSeed_course")?,
        conv_seed_time_cs: cells::centiseconds(row, "ConvSeed_time")?,
        scratched: cells::flag(row, "Scr_stat")?,
        bonus_event: cells::flag(row, "Bonus_event")?,
        prelim_exhibition: cells::text(row, "Pre_exh"),
        final_exhibition: cells::text(row, "Fin_exh"),
    })
}
