//! Test utilities for EV3 parser testing
//!
//! Builders for header and event lines with the exact field counts of the
//! layouts, plus temporary-file helpers.

use std::io::Write;
use tempfile::NamedTempFile;


/// Build a 33-field header line
pub fn header_line(meet_name: &str) -> String {
    let mut fields = vec![String::new(); 33];
    fields[0] = meet_name.to_string();
    fields[1] = "Harry Jerome Pool".to_string();
    fields[2] = "02/23/2024".to_string();
    fields[3] = "02/25/2024".to_string();
    fields[4] = "12/31/2024".to_string();
    fields[5] = "1".to_string();
    fields[9] = "3.0".to_string();
    fields[10] = "Hy-Tek, Ltd".to_string();
    fields[11] = "MM5 8.0Gb".to_string();
    fields[12] = "02/01/2024".to_string();
    fields[16] = "09/01/2022".to_string();
    fields[21] = "7".to_string();
    fields[22] = "A".to_string();
    fields[29] = "CAN".to_string();
    fields[30] = "BC".to_string();
    fields[31] = "Y".to_string();
    fields.join(";")
}

/// Event line fields that tests vary; everything else takes a fixed value
#[derive(Debug, Clone)]
pub struct EventLine {
    pub event_no: &'static str,
    pub gender: &'static str,
    pub min_age: &'static str,
    pub max_age: &'static str,
    pub distance: &'static str,
    pub stroke: &'static str,
    pub lcm_dqt: &'static str,
    pub lcm_qt: &'static str,
    pub scm_dqt: &'static str,
    pub scm_qt: &'static str,
    pub scy_dqt: &'static str,
    pub scy_qt: &'static str,
}

impl Default for EventLine {
    fn default() -> Self {
        Self {
            event_no: "1",
            gender: "F",
            min_age: "13",
            max_age: "14",
            distance: "100",
            stroke: "A",
            lcm_dqt: "",
            lcm_qt: "1:05.00",
            scm_dqt: "",
            scm_qt: "1:03.50",
            scy_dqt: "",
            scy_qt: "",
        }
    }
}

impl EventLine {
    /// Render as a 30-field line
    pub fn render(&self) -> String {
        let fields: [&str; 30] = [
            self.event_no,
            "0",
            "P",
            "1",
            "I",
            self.gender,
            self.min_age,
            self.max_age,
            self.distance,
            self.stroke,
            "",
            "",
            "",
            "N",
            "10.00",
            self.lcm_dqt,
            self.lcm_qt,
            self.scm_dqt,
            self.scm_qt,
            self.scy_dqt,
            self.scy_qt,
            "1",
            self.event_no,
            "1",
            "09:00 AM",
            "2",
            "",
            "",
            "",
            "",
        ];
        fields.join(";")
    }
}

/// Full EV3 content from a header and event lines
pub fn ev3_content(events: &[EventLine]) -> String {
    let mut lines = vec![header_line("2024 Western Region SC Championships")];
    lines.extend(events.iter().map(EventLine::render));
    lines.join("\r\n")
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "{}", content).unwrap();
    temp_file
}
