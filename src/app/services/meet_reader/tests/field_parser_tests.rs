//! Tests for meet database cell conversions

use super::*;
use crate::app::models::Course;
use crate::app::services::meet_reader::field_parsers as cells;
use chrono::NaiveDate;

fn single_row(column: &str, value: Option<&str>) -> ResultTable {
    ResultTable::new(
        vec![column.to_string()],
        vec![vec![value.map(str::to_string)]],
    )
}

#[test]
fn test_column_lookup_is_case_insensitive() {
    let table = single_row("Event_Dist", Some("100"));
    assert_eq!(table.column_index("event_dist"), Some(0));
    assert_eq!(table.column_index("EVENT_DIST"), Some(0));
    let row = table.rows().next().unwrap();
    assert_eq!(row.get("Event_dist"), Some("100"));
    assert_eq!(row.get("Missing"), None);
}

#[test]
fn test_text_is_trimmed_and_null_is_empty() {
    let table = single_row("Team_abbr", Some("  WRSC "));
    assert_eq!(cells::text(&table.rows().next().unwrap(), "Team_abbr"), "WRSC");

    let table = single_row("Team_abbr", None);
    assert_eq!(cells::text(&table.rows().next().unwrap(), "Team_abbr"), "");
}

#[test]
fn test_flags() {
    for (value, expected) in [
        (Some("1"), true),
        (Some("-1"), true),
        (Some("True"), true),
        (Some("0"), false),
        (Some("false"), false),
        (None, false),
    ] {
        let table = single_row("Scr_stat", value);
        let row = table.rows().next().unwrap();
        assert_eq!(cells::flag(&row, "Scr_stat").unwrap(), expected, "{:?}", value);
    }

    let table = single_row("Scr_stat", Some("maybe"));
    assert!(cells::flag(&table.rows().next().unwrap(), "Scr_stat").is_err());
}

#[test]
fn test_course_codes() {
    let table = single_row("ActSeed_course", Some("Y"));
    let row = table.rows().next().unwrap();
    assert_eq!(cells::course(&row, "ActSeed_course").unwrap(), Some(Course::Scy));

    let table = single_row("ActSeed_course", None);
    let row = table.rows().next().unwrap();
    assert_eq!(cells::course(&row, "ActSeed_course").unwrap(), None);

    let table = single_row("ActSeed_course", Some("Q"));
    let row = table.rows().next().unwrap();
    assert!(cells::course(&row, "ActSeed_course").is_err());
}

#[test]
fn test_optional_integer() {
    let table = single_row("Ath_age", Some("13"));
    let row = table.rows().next().unwrap();
    assert_eq!(cells::optional_integer(&row, "Ath_age").unwrap(), Some(13));

    let table = single_row("Ath_age", Some(""));
    let row = table.rows().next().unwrap();
    assert_eq!(cells::optional_integer(&row, "Ath_age").unwrap(), None);

    let table = single_row("Ath_age", Some("thirteen"));
    let row = table.rows().next().unwrap();
    assert!(cells::optional_integer(&row, "Ath_age").is_err());
}

#[test]
fn test_db_dates() {
    let expected = NaiveDate::from_ymd_opt(2010, 5, 3);
    assert_eq!(cells::parse_db_date("2010-05-03 00:00:00"), expected);
    assert_eq!(cells::parse_db_date("2010-05-03 00:00:00.000"), expected);
    assert_eq!(cells::parse_db_date("2010-05-03T00:00:00"), expected);
    assert_eq!(cells::parse_db_date("2010-05-03"), expected);
    assert_eq!(cells::parse_db_date("05/03/2010"), expected);
    assert_eq!(cells::parse_db_date("yesterday"), None);
}
