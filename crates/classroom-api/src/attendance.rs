use axum::{
    Json,
    extract::{Query, State},
};

use classroom_store::report::DEFAULT_REPORT_TEACHER;
use classroom_types::api::{AttendanceReport, CheckRequest, ReportQuery};
use classroom_types::events::HubEvent;
use classroom_types::models::AttendanceEvent;

use crate::error::Result;
use crate::extract::Payload;
use crate::state::AppState;

/// POST /api/attendance/check: record a start or end. Any other `type` is a 400.
pub async fn check(
    State(state): State<AppState>,
    Payload(req): Payload<CheckRequest>,
) -> Result<Json<AttendanceEvent>> {
    let event = state.store.append_attendance(&req.teacher_id, req.kind)?;

    state.publish(&HubEvent::Attendance(event.clone()));

    Ok(Json(event))
}

/// GET /api/admin/attendance/report: worked vs. expected hours for one
/// teacher, `teacher-1` unless `?teacherId=` says otherwise.
pub async fn report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<AttendanceReport>> {
    let teacher_id = query
        .teacher_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| DEFAULT_REPORT_TEACHER.to_string());

    Ok(Json(state.store.attendance_report(&teacher_id)?))
}
