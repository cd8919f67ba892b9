//! Column layouts of the EV3 header and event records
//!
//! EV3 files carry no column headers, so each record type is described by a
//! fixed, ordered schema of named and typed columns. A record whose field count
//! falls outside its layout is rejected rather than silently misaligned.

use csv::StringRecord;

use crate::{Error, Result};

/// Declared type of an EV3 column, selecting the transform applied to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Kept as trimmed text
    Text,
    /// Whole number, required
    Integer,
    /// Non-negative whole number; blank means absent
    Count,
    /// Race time text; blank defaults to the no-standard sentinel
    Time,
    /// Gender letter folded to M/F
    Gender,
    /// Calendar date; blank means absent
    Date,
}

/// One named column of a record layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn col(name: &'static str, kind: FieldKind) -> ColumnSpec {
    ColumnSpec { name, kind }
}

/// Ordered schema of one EV3 record type
#[derive(Debug, PartialEq, Eq)]
pub struct RecordLayout {
    pub name: &'static str,
    pub columns: &'static [ColumnSpec],
    /// Leading columns every record must carry; the rest may be absent
    pub required_fields: usize,
}

/// First line of an EV3 file: 33 mandatory fields, 2 trailing optional ones
pub static HEADER_LAYOUT: RecordLayout = RecordLayout {
    name: "header",
    required_fields: 33,
    columns: &[
        col("meet_name", FieldKind::Text),
        col("pool_name", FieldKind::Text),
        col("meet_start_date", FieldKind::Date),
        col("meet_end_date", FieldKind::Date),
        col("age_up_date", FieldKind::Date),
        col("seeding_type", FieldKind::Text),
        col("team_surcharge", FieldKind::Text),
        col("athlete_surcharge", FieldKind::Text),
        col("facility_surcharge", FieldKind::Text),
        col("file_format", FieldKind::Text),
        col("meet_software", FieldKind::Text),
        col("meet_software_version", FieldKind::Text),
        col("date_generated", FieldKind::Text),
        col("unknown1", FieldKind::Text),
        col("sanction_number", FieldKind::Text),
        col("altitude", FieldKind::Text),
        col("valid_times_start_date", FieldKind::Date),
        col("minimum_age_open_events", FieldKind::Text),
        col("max_total_entries", FieldKind::Text),
        col("max_individual_entries", FieldKind::Text),
        col("max_relay_entries", FieldKind::Text),
        // 1=USA, 2=NZ, 3=SA, 4=AUS, 5=GBR, 6=Other, 7=CAN, 8=USMS
        col("id_format", FieldKind::Text),
        // (A)gegroup, (O)pen, (H)igh school, (C)ollege, (Y)MCA, (M)asters, (D)isabled
        col("class", FieldKind::Text),
        col("entry_deadline", FieldKind::Text),
        col("pool_address1", FieldKind::Text),
        col("pool_address2", FieldKind::Text),
        col("pool_city", FieldKind::Text),
        col("pool_province", FieldKind::Text),
        col("pool_postal_code", FieldKind::Text),
        col("pool_country", FieldKind::Text),
        col("host_lsc", FieldKind::Text),
        col("exclude_no_times", FieldKind::Text),
        col("unknown2", FieldKind::Text),
        col("entry_open_date", FieldKind::Text),
        col("check_digit", FieldKind::Text),
    ],
};

/// Every line after the header: one event per line
pub static EVENT_LAYOUT: RecordLayout = RecordLayout {
    name: "event",
    required_fields: 30,
    columns: &[
        col("event_no", FieldKind::Text),
        col("subevent_no", FieldKind::Text),
        col("prelims_finals", FieldKind::Text),
        col("rounds", FieldKind::Text),
        col("ind_or_relay", FieldKind::Text),
        col("gender", FieldKind::Gender),
        col("min_age", FieldKind::Integer),
        col("max_age", FieldKind::Integer),
        col("distance", FieldKind::Count),
        col("stroke", FieldKind::Text),
        col("unknown1", FieldKind::Text),
        col("unknown2", FieldKind::Text),
        col("unknown3", FieldKind::Text),
        // N=standard, D=disability
        col("event_type", FieldKind::Text),
        col("event_fee", FieldKind::Text),
        col("lcm_dqt", FieldKind::Time),
        col("lcm_qt", FieldKind::Time),
        col("scm_dqt", FieldKind::Time),
        col("scm_qt", FieldKind::Time),
        col("scy_dqt", FieldKind::Text),
        col("scy_qt", FieldKind::Text),
        col("session_number", FieldKind::Text),
        col("session_event", FieldKind::Text),
        col("session_meet_day", FieldKind::Text),
        col("session_start_time", FieldKind::Text),
        // 1=LCM, 2=SCM, 3=SCY
        col("session_course", FieldKind::Text),
        col("max_entries", FieldKind::Text),
        col("max_individual_entries", FieldKind::Text),
        col("max_relay_entries", FieldKind::Text),
        col("relay_team_members", FieldKind::Text),
    ],
};

impl RecordLayout {
    pub fn max_fields(&self) -> usize {
        self.columns.len()
    }

    /// Position of a named column
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    /// Human-readable field count this layout accepts
    pub fn expected_fields(&self) -> String {
        if self.required_fields == self.max_fields() {
            self.required_fields.to_string()
        } else {
            format!("{} to {}", self.required_fields, self.max_fields())
        }
    }

    /// Validate a record's field count and return how many of its fields
    /// belong to this layout.
    ///
    /// One extra empty field, left by a terminating `;`, is not counted.
    pub fn check_field_count(&self, record: &StringRecord, line: u64) -> Result<usize> {
        let mut found = record.len();
        if found == self.max_fields() + 1
            && record.get(found - 1).is_some_and(|last| last.trim().is_empty())
        {
            found -= 1;
        }

        if found < self.required_fields || found > self.max_fields() {
            return Err(Error::schema_mismatch(
                self.name,
                line,
                self.expected_fields(),
                record.len(),
            ));
        }

        Ok(found)
    }
}
