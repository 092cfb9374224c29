use serde::{Deserialize, Serialize};

use crate::models::{Announcement, AttendanceEvent, SharedFile};

/// Events pushed to every `/events` subscriber after a committed mutation.
///
/// Serializes as `{"type": "...", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum HubEvent {
    /// A teacher checked in or out
    Attendance(AttendanceEvent),

    /// A file reference was posted to a class
    FileUploaded(SharedFile),

    /// An administrator posted an announcement
    Announcement(Announcement),
}

impl HubEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Attendance(_) => "attendance",
            Self::FileUploaded(_) => "file_uploaded",
            Self::Announcement(_) => "announcement",
        }
    }
}
