//! Course projection of event rows into time standards
//!
//! Fans each event row out over the projected courses, keeping one
//! qualifying/de-qualifying pair per row, and drops pairs with no standard.

use tracing::debug;

use crate::app::models::{Course, CourseTimes, EventRecord, TimeStandardRecord};
use crate::constants::NO_STANDARD_TEXT;

/// Project events into time standards.
///
/// All LCM rows come first, then all SCM rows; within a course, rows keep
/// the order of `events`.
pub fn project_time_standards(events: &[EventRecord]) -> Vec<TimeStandardRecord> {
    let standards: Vec<TimeStandardRecord> = Course::PROJECTED
        .iter()
        .flat_map(|&course| {
            events
                .iter()
                .filter_map(move |event| project_event(event, course))
        })
        .collect();

    debug!(
        "Projected {} time standards from {} events",
        standards.len(),
        events.len()
    );

    standards
}

/// A pair defines a standard unless its qualifying time is the sentinel text
/// or encodes to zero.
pub fn has_standard(times: &CourseTimes<'_>) -> bool {
    times.qualifying != NO_STANDARD_TEXT && times.qualifying_cs > 0
}

fn project_event(event: &EventRecord, course: Course) -> Option<TimeStandardRecord> {
    let times = event.course_times(course)?;
    if !has_standard(&times) {
        return None;
    }

    Some(TimeStandardRecord {
        event_no: event.event_no.clone(),
        subevent_no: event.subevent_no.clone(),
        prelims_or_finals: event.prelims_finals.clone(),
        ind_or_relay: event.ind_or_relay.clone(),
        gender: event.gender.clone(),
        min_age: event.min_age,
        max_age: event.max_age,
        distance: event.distance,
        stroke_code: event.stroke.clone(),
        course,
        qualifying_time: times.qualifying.to_string(),
        dequalifying_time: times.dequalifying.to_string(),
        qualifying_time_cs: times.qualifying_cs,
        dequalifying_time_cs: times.dequalifying_cs,
    })
}
