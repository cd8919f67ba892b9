//! Integration tests for the EV3 parser and CSV export
//!
//! These tests write realistic event exports to disk and run them through the
//! public API end to end, from file to time standards to CSV.

use hytek_ingest::app::services::csv_export::export_records;
use hytek_ingest::app::services::ev3_parser::Ev3Parser;
use hytek_ingest::app::services::time_codec::{format_time, parse_time};
use hytek_ingest::config::{GenderPolicy, TimeParseMode};
use hytek_ingest::{Course, Error, Gender, ParseOptions};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const HEADER: &str = "\u{feff}2024 Provincial Age Group Championships;Saanich Commonwealth Place;\
07/12/2024;07/14/2024;12/31/2024;1;;;;3.0;Hy-Tek, Ltd;MM5 8.0Gb;06/01/2024;;SN-1234;0;\
09/01/2023;;;;;7;A;;4636 Elk Lake Dr;;Victoria;BC;V8Z 5M2;CAN;BC;Y;";

/// Event line with the six course time columns given in file order
fn event(
    event_no: &str,
    gender: &str,
    ages: (&str, &str),
    distance: &str,
    stroke: &str,
    times: [&str; 6],
) -> String {
    let fields = [
        event_no, "0", "P", "1", "I", gender, ages.0, ages.1, distance, stroke, "", "", "", "N",
        "12.00", times[0], times[1], times[2], times[3], times[4], times[5], "1", event_no, "1",
        "08:30 AM", "1", "", "", "", "",
    ];
    fields.join(";")
}

fn write_ev3(lines: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let mut content = vec![HEADER.to_string()];
    content.extend(lines.iter().cloned());
    write!(file, "{}\r\n", content.join("\r\n")).unwrap();
    file
}

#[test]
fn test_parse_full_meet_file() {
    let file = write_ev3(&[
        event("1", "F", ("11", "12"), "50", "A", ["", "33.10", "", "32.50", "", ""]),
        event("2", "M", ("11", "12"), "50", "A", ["", "31.90", "", "", "", "27.80"]),
        event("3", "W", ("13", "14"), "200", "E", ["", "2:41.20", "", "2:38.05", "", ""]),
        event("4", "B", ("15", "99"), "1500", "A", ["", "18:40.00", "", "18:10.50", "", ""]),
    ]);

    let ev3 = Ev3Parser::default().parse_file(file.path()).unwrap();

    assert_eq!(ev3.header.meet_name, "2024 Provincial Age Group Championships");
    assert_eq!(ev3.header.pool_name, "Saanich Commonwealth Place");
    assert_eq!(
        ev3.header.meet_start_date,
        chrono::NaiveDate::from_ymd_opt(2024, 7, 12)
    );
    assert_eq!(ev3.events.len(), 4);

    let genders: Vec<Gender> = ev3.events.iter().map(|e| e.gender.clone()).collect();
    assert_eq!(
        genders,
        vec![Gender::Female, Gender::Male, Gender::Female, Gender::Male]
    );

    let distance_free = &ev3.events[3];
    assert_eq!(distance_free.distance, Some(1500));
    assert_eq!(distance_free.lcm_qt_cs, 112000);
    assert_eq!(distance_free.scm_qt_cs, 109050);
}

#[test]
fn test_time_standards_projection_end_to_end() {
    let file = write_ev3(&[
        event("1", "F", ("11", "12"), "50", "A", ["", "33.10", "", "32.50", "", ""]),
        event("2", "M", ("11", "12"), "50", "A", ["", "31.90", "", "", "", "27.80"]),
        event("3", "F", ("13", "14"), "100", "B", ["", "", "", "", "", ""]),
    ]);

    let ev3 = Ev3Parser::default().parse_file(file.path()).unwrap();
    let standards = ev3.time_standards();

    // LCM rows for events 1 and 2, then SCM for event 1 only; SCY is never projected
    let summary: Vec<(&str, Course, u32)> = standards
        .iter()
        .map(|s| (s.event_no.as_str(), s.course, s.qualifying_time_cs))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("1", Course::Lcm, 3310),
            ("2", Course::Lcm, 3190),
            ("1", Course::Scm, 3250),
        ]
    );
    assert!(standards.iter().all(|s| s.qualifying_time_cs > 0));
}

#[test]
fn test_export_time_standards_to_csv() {
    let file = write_ev3(&[event(
        "7",
        "M",
        ("13", "14"),
        "100",
        "D",
        ["1:20.00", "1:05.49", "", "1:03.99", "", ""],
    )]);
    let ev3 = Ev3Parser::default().parse_file(file.path()).unwrap();

    let output = TempDir::new().unwrap();
    let path = output.path().join("time_standards.csv");
    let written = export_records(&ev3.time_standards(), &path).unwrap();
    assert_eq!(written, 2);

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "7,0,P,I,M,13,14,100,D,LCM,1:05.49,1:20.00,6549,8000");
    assert_eq!(lines[2], "7,0,P,I,M,13,14,100,D,SCM,1:03.99,0.00,6399,0");
}

#[test]
fn test_strict_mode_rejects_malformed_time() {
    let file = write_ev3(&[event(
        "1",
        "F",
        ("11", "12"),
        "50",
        "A",
        ["", "33.1", "", "", "", ""],
    )]);

    let lenient = Ev3Parser::default().parse_file(file.path()).unwrap();
    assert_eq!(lenient.events[0].lcm_qt_cs, 0);
    assert!(lenient.time_standards().is_empty());

    let strict = Ev3Parser::new(ParseOptions::default().with_time_mode(TimeParseMode::Strict));
    match strict.parse_file(file.path()) {
        Err(Error::DataValidation { message }) => assert!(message.contains("lcm_qt")),
        other => panic!("expected data validation error, got {:?}", other),
    }
}

#[test]
fn test_gender_policy() {
    let file = write_ev3(&[event("1", "X", ("11", "12"), "50", "A", ["", "33.10", "", "", "", ""])]);

    let ev3 = Ev3Parser::default().parse_file(file.path()).unwrap();
    assert_eq!(
        ev3.events[0].gender,
        Gender::Unrecognized("X".to_string())
    );

    let strict = Ev3Parser::new(ParseOptions::default().with_gender_policy(GenderPolicy::Strict));
    assert!(strict.parse_file(file.path()).is_err());
}

#[test]
fn test_truncated_event_line_is_schema_mismatch() {
    let mut line = event("1", "F", ("11", "12"), "50", "A", ["", "33.10", "", "", "", ""]);
    line.truncate(line.rfind(';').unwrap());
    line.truncate(line.rfind(';').unwrap());
    let file = write_ev3(&[line]);

    match Ev3Parser::default().parse_file(file.path()) {
        Err(Error::SchemaMismatch {
            layout,
            line,
            found,
            ..
        }) => {
            assert_eq!(layout, "event");
            assert_eq!(line, 2);
            assert_eq!(found, 28);
        }
        other => panic!("expected schema mismatch, got {:?}", other),
    }
}

#[test]
fn test_codec_round_trip_on_parsed_times() {
    let file = write_ev3(&[event(
        "1",
        "F",
        ("11", "12"),
        "400",
        "E",
        ["", "5:59.99", "", "6:00.00", "", ""],
    )]);
    let ev3 = Ev3Parser::default().parse_file(file.path()).unwrap();
    let event = &ev3.events[0];

    assert_eq!(format_time(event.lcm_qt_cs), event.lcm_qt);
    assert_eq!(parse_time(&event.scm_qt).unwrap(), event.scm_qt_cs);
    assert_eq!(event.scm_qt_cs, 36000);
}
