use serde::{Deserialize, Serialize};

use crate::models::AttendanceKind;

// -- Auth --

/// Missing or malformed fields are tolerated; the login stub falls back to a student.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
}

// -- Attendance --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    #[serde(default)]
    pub teacher_id: String,
    #[serde(rename = "type")]
    pub kind: AttendanceKind,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub teacher_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceReport {
    pub teacher_id: String,
    pub expected_hours: u32,
    pub worked_hours: u32,
    pub missing_hours: u32,
    pub events_recorded: usize,
}

// -- Files --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileRequest {
    #[serde(default)]
    pub teacher_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

// -- Announcements --

#[derive(Debug, Deserialize)]
pub struct AnnouncementRequest {
    #[serde(default)]
    pub message: String,
}

// -- Health --

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".into(),
        }
    }
}
