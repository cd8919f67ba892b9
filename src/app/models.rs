//! Canonical record types produced by the ingestion layer
//!
//! Every record is an immutable snapshot built fresh on each parse or query.
//! Times are carried as exact integer centiseconds; zero means "no time".

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::constants::{FEMALE_GENDER_CODES, MALE_GENDER_CODES};

/// Hundredths of a second. Zero is the "no time / no standard" sentinel.
pub type Centiseconds = u32;

/// Pool configuration a time was swum or a standard was set in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Course {
    #[serde(rename = "LCM")]
    Lcm,
    #[serde(rename = "SCM")]
    Scm,
    #[serde(rename = "SCY")]
    Scy,
}

impl Course {
    /// Courses that carry standards in the course projection, in output order
    pub const PROJECTED: [Course; 2] = [Course::Lcm, Course::Scm];

    /// Short label used in exports
    pub fn label(&self) -> &'static str {
        match self {
            Course::Lcm => "LCM",
            Course::Scm => "SCM",
            Course::Scy => "SCY",
        }
    }

    /// Decode a HyTek course code.
    ///
    /// Accepts the seed-course letters (`L`, `S`, `Y`), the numeric session
    /// codes (`1`, `2`, `3`) and the labels themselves, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "L" | "1" | "LCM" => Some(Course::Lcm),
            "S" | "2" | "SCM" => Some(Course::Scm),
            "Y" | "3" | "SCY" => Some(Course::Scy),
            _ => None,
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Event gender after folding the source's letter variants
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    /// A code outside the known letters, kept verbatim
    Unrecognized(String),
}

impl Gender {
    /// Fold a raw gender letter: `M`/`B` to male, `F`/`W`/`G` to female,
    /// anything else kept as-is.
    pub fn normalize(code: &str) -> Self {
        let code = code.trim();
        if MALE_GENDER_CODES.contains(&code) {
            Gender::Male
        } else if FEMALE_GENDER_CODES.contains(&code) {
            Gender::Female
        } else {
            Gender::Unrecognized(code.to_string())
        }
    }

    /// Code written to exports
    pub fn code(&self) -> &str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Unrecognized(code) => code,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Gender::Unrecognized(_))
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Gender {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Single header record at the top of an EV3 export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventHeaderRecord {
    pub meet_name: String,
    pub pool_name: String,
    pub meet_start_date: Option<NaiveDate>,
    pub meet_end_date: Option<NaiveDate>,
    pub age_up_date: Option<NaiveDate>,
    pub seeding_type: String,
    pub team_surcharge: String,
    pub athlete_surcharge: String,
    pub facility_surcharge: String,
    pub file_format: String,
    pub meet_software: String,
    pub meet_software_version: String,
    pub date_generated: String,
    pub sanction_number: String,
    pub altitude: String,
    pub valid_times_start_date: Option<NaiveDate>,
    pub minimum_age_open_events: String,
    pub max_total_entries: String,
    pub max_individual_entries: String,
    pub max_relay_entries: String,
    pub id_format: String,
    pub meet_class: String,
    pub entry_deadline: String,
    pub pool_address1: String,
    pub pool_address2: String,
    pub pool_city: String,
    pub pool_province: String,
    pub pool_postal_code: String,
    pub pool_country: String,
    pub host_lsc: String,
    pub exclude_no_times: String,
    pub entry_open_date: String,
    pub check_digit: String,
}

/// One event row of an EV3 export with its derived centisecond columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub event_no: String,
    pub subevent_no: String,
    pub prelims_finals: String,
    pub rounds: String,
    pub ind_or_relay: String,
    pub gender: Gender,
    pub min_age: i32,
    pub max_age: i32,
    pub distance: Option<u32>,
    pub stroke: String,
    pub event_type: String,
    pub event_fee: String,
    pub lcm_dqt: String,
    pub lcm_qt: String,
    pub scm_dqt: String,
    pub scm_qt: String,
    pub scy_dqt: String,
    pub scy_qt: String,
    pub session_number: String,
    pub session_event: String,
    pub session_meet_day: String,
    pub session_start_time: String,
    pub session_course: String,
    pub max_entries: String,
    pub max_individual_entries: String,
    pub max_relay_entries: String,
    pub relay_team_members: String,
    pub lcm_qt_cs: Centiseconds,
    pub lcm_dqt_cs: Centiseconds,
    pub scm_qt_cs: Centiseconds,
    pub scm_dqt_cs: Centiseconds,
}

/// Qualifying/de-qualifying pair of one event for one course
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseTimes<'a> {
    pub qualifying: &'a str,
    pub dequalifying: &'a str,
    pub qualifying_cs: Centiseconds,
    pub dequalifying_cs: Centiseconds,
}

impl EventRecord {
    /// Standards for a projected course; `None` for SCY, which carries no
    /// derived centisecond columns.
    pub fn course_times(&self, course: Course) -> Option<CourseTimes<'_>> {
        match course {
            Course::Lcm => Some(CourseTimes {
                qualifying: &self.lcm_qt,
                dequalifying: &self.lcm_dqt,
                qualifying_cs: self.lcm_qt_cs,
                dequalifying_cs: self.lcm_dqt_cs,
            }),
            Course::Scm => Some(CourseTimes {
                qualifying: &self.scm_qt,
                dequalifying: &self.scm_dqt,
                qualifying_cs: self.scm_qt_cs,
                dequalifying_cs: self.scm_dqt_cs,
            }),
            Course::Scy => None,
        }
    }

    /// Course the event's session is swum in, if the code is known
    pub fn session_course(&self) -> Option<Course> {
        Course::from_code(&self.session_course)
    }
}

/// One qualifying standard for one event and course
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStandardRecord {
    pub event_no: String,
    pub subevent_no: String,
    pub prelims_or_finals: String,
    pub ind_or_relay: String,
    pub gender: Gender,
    pub min_age: i32,
    pub max_age: i32,
    pub distance: Option<u32>,
    pub stroke_code: String,
    pub course: Course,
    pub qualifying_time: String,
    pub dequalifying_time: String,
    pub qualifying_time_cs: Centiseconds,
    pub dequalifying_time_cs: Centiseconds,
}

/// Meet configuration row of a meet database
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeetHeader {
    pub meet_name: String,
    pub meet_start: Option<NaiveDate>,
    pub meet_end: Option<NaiveDate>,
    pub calc_date: Option<NaiveDate>,
    pub course_order: String,
    pub entry_eligibility_date: Option<NaiveDate>,
}

/// One athlete entered in one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRecord {
    pub team_abbr: String,
    pub last_name: String,
    pub first_name: String,
    pub reg_no: String,
    pub sex: String,
    pub birth_date: Option<NaiveDate>,
    pub age: Option<i32>,
    pub event_no: String,
    pub ind_rel: String,
    pub event_dist: u32,
    pub stroke_code: String,
    pub min_age: Option<i32>,
    pub event_type: String,
    pub actual_seed_course: Option<Course>,
    pub actual_seed_time_cs: Centiseconds,
    pub conv_seed_course: Option<Course>,
    pub conv_seed_time_cs: Centiseconds,
    pub scratched: bool,
    pub bonus_event: bool,
    pub prelim_exhibition: String,
    pub final_exhibition: String,
}

impl EntryRecord {
    /// True when the entry carries a seed time in its own course
    pub fn has_seed_time(&self) -> bool {
        self.actual_seed_time_cs > 0
    }
}
