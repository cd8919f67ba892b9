//! Core EV3 parser implementation
//!
//! Reads the header line and the event lines of an EV3 export, converts each
//! through its column layout and assembles the typed records.

use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use super::field_parsers::{ParsedRow, parse_row};
use super::layout::{EVENT_LAYOUT, HEADER_LAYOUT};
use super::projection::project_time_standards;
use crate::app::models::{EventHeaderRecord, EventRecord, TimeStandardRecord};
use crate::config::ParseOptions;
use crate::constants::EV3_DELIMITER;
use crate::{Error, Result};

/// Parsed contents of one EV3 file
#[derive(Debug, Clone, PartialEq)]
pub struct Ev3File {
    pub header: EventHeaderRecord,
    /// Event rows in file order
    pub events: Vec<EventRecord>,
}

impl Ev3File {
    /// Per-course qualifying standards, LCM rows first, then SCM
    pub fn time_standards(&self) -> Vec<TimeStandardRecord> {
        project_time_standards(&self.events)
    }
}

/// Parser for HyTek EV3 event exports
#[derive(Debug, Clone, Default)]
pub struct Ev3Parser {
    options: ParseOptions,
}

impl Ev3Parser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse an EV3 file from disk
    pub fn parse_file(&self, file_path: &Path) -> Result<Ev3File> {
        info!("Parsing EV3 file: {}", file_path.display());

        let file = File::open(file_path).map_err(|e| {
            Error::io(
                format!("Failed to open EV3 file {}", file_path.display()),
                e,
            )
        })?;

        self.parse_reader(file, &file_path.display().to_string())
    }

    /// Parse EV3 content from any reader; `source_name` labels errors
    pub fn parse_reader<R: Read>(&self, reader: R, source_name: &str) -> Result<Ev3File> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(EV3_DELIMITER)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            // Split on `\n` alone so CRLF files keep true line numbers; the
            // stray `\r` lands on the last field, which is trimmed
            .terminator(csv::Terminator::Any(b'\n'))
            .from_reader(reader);

        let mut records = csv_reader.records();

        let header_record = records
            .next()
            .ok_or_else(|| Error::ev3_format(source_name, "File is empty, expected a header record"))?
            .map_err(|e| {
                Error::csv_parsing(source_name, "Failed to read header record", Some(e))
            })?;
        let header = parse_header(&header_record, &self.options)?;
        debug!("Parsed EV3 header for meet '{}'", header.meet_name);

        let mut events = Vec::new();
        for result in records {
            let record = result.map_err(|e| {
                Error::csv_parsing(source_name, "Failed to read event record", Some(e))
            })?;

            if is_blank(&record) {
                continue;
            }

            let line = record_line(&record);
            let row = parse_row(&EVENT_LAYOUT, &record, line, &self.options)?;
            events.push(event_from_row(&row)?);
        }

        info!(
            "Parsed {} events for meet '{}' from {}",
            events.len(),
            header.meet_name,
            source_name
        );

        Ok(Ev3File { header, events })
    }
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map_or(0, |position| position.line())
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

fn parse_header(record: &StringRecord, options: &ParseOptions) -> Result<EventHeaderRecord> {
    let row = parse_row(&HEADER_LAYOUT, record, record_line(record), options)?;
    header_from_row(&row)
}

fn header_from_row(row: &ParsedRow) -> Result<EventHeaderRecord> {
    Ok(EventHeaderRecord {
        meet_name: row.text("meet_name")?.trim_start_matches('\u{feff}').to_string(),
        pool_name: row.text("pool_name")?,
        meet_start_date: row.date("meet_start_date")?,
        meet_end_date: row.date("meet_end_date")?,
        age_up_date: row.date("age_up_date")?,
        seeding_type: row.text("seeding_type")?,
        team_surcharge: row.text("team_surcharge")?,
        athlete_surcharge: row.text("athlete_surcharge")?,
        facility_surcharge: row.text("facility_surcharge")?,
        file_format: row.text("file_format")?,
        meet_software: row.text("meet_software")?,
        meet_software_version: row.text("meet_software_version")?,
        date_generated: row.text("date_generated")?,
        sanction_number: row.text("sanction_number")?,
        altitude: row.text("altitude")?,
        valid_times_start_date: row.date("valid_times_start_date")?,
        minimum_age_open_events: row.text("minimum_age_open_events")?,
        max_total_entries: row.text("max_total_entries")?,
        max_individual_entries: row.text("max_individual_entries")?,
        max_relay_entries: row.text("max_relay_entries")?,
        id_format: row.text("id_format")?,
        meet_class: row.text("class")?,
        entry_deadline: row.text("entry_deadline")?,
        pool_address1: row.text("pool_address1")?,
        pool_address2: row.text("pool_address2")?,
        pool_city: row.text("pool_city")?,
        pool_province: row.text("pool_province")?,
        pool_postal_code: row.text("pool_postal_code")?,
        pool_country: row.text("pool_country")?,
        host_lsc: row.text("host_lsc")?,
        exclude_no_times: row.text("exclude_no_times")?,
        entry_open_date: row.text("entry_open_date")?,
        check_digit: row.text("check_digit")?,
    })
}

fn event_from_row(row: &ParsedRow) -> Result<EventRecord> {
    let (lcm_dqt, lcm_dqt_cs) = row.time("lcm_dqt")?;
    let (lcm_qt, lcm_qt_cs) = row.time("lcm_qt")?;
    let (scm_dqt, scm_dqt_cs) = row.time("scm_dqt")?;
    let (scm_qt, scm_qt_cs) = row.time("scm_qt")?;

    Ok(EventRecord {
        event_no: row.text("event_no")?,
        subevent_no: row.text("subevent_no")?,
        prelims_finals: row.text("prelims_finals")?,
        rounds: row.text("rounds")?,
        ind_or_relay: row.text("ind_or_relay")?,
        gender: row.gender("gender")?,
        min_age: row.integer("min_age")?,
        max_age: row.integer("max_age")?,
        distance: row.count("distance")?,
        stroke: row.text("stroke")?,
        event_type: row.text("event_type")?,
        event_fee: row.text("event_fee")?,
        lcm_dqt,
        lcm_qt,
        scm_dqt,
        scm_qt,
        scy_dqt: row.text("scy_dqt")?,
        scy_qt: row.text("scy_qt")?,
        session_number: row.text("session_number")?,
        session_event: row.text("session_event")?,
        session_meet_day: row.text("session_meet_day")?,
        session_start_time: row.text("session_start_time")?,
        session_course: row.text("session_course")?,
        max_entries: row.text("max_entries")?,
        max_individual_entries: row.text("max_individual_entries")?,
        max_relay_entries: row.text("max_relay_entries")?,
        relay_team_members: row.text("relay_team_members")?,
        lcm_qt_cs,
        lcm_dqt_cs,
        scm_qt_cs,
        scm_dqt_cs,
    })
}
