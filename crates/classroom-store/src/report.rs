use classroom_types::api::AttendanceReport;
use classroom_types::models::{AttendanceEvent, AttendanceKind};

/// Teacher the report covers when the caller doesn't name one.
pub const DEFAULT_REPORT_TEACHER: &str = "teacher-1";

/// Derive the attendance report for `teacher_id`.
///
/// Worked hours count one start/end pair as two hours:
/// `((starts + ends) / 2) * 2` with integer division, so the result is always
/// even. `events_recorded` covers every teacher.
pub fn summarize(events: &[AttendanceEvent], teacher_id: &str, expected_hours: u32) -> AttendanceReport {
    let (starts, ends) = events
        .iter()
        .filter(|e| e.teacher_id == teacher_id)
        .fold((0u32, 0u32), |(starts, ends), e| match e.kind {
            AttendanceKind::Start => (starts + 1, ends),
            AttendanceKind::End => (starts, ends + 1),
        });

    let worked_hours = (starts + ends) / 2 * 2;

    AttendanceReport {
        teacher_id: teacher_id.to_string(),
        expected_hours,
        worked_hours,
        missing_hours: expected_hours.saturating_sub(worked_hours),
        events_recorded: events.len(),
    }
}
