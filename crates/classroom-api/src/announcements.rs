use axum::{Json, extract::State};

use classroom_types::api::AnnouncementRequest;
use classroom_types::events::HubEvent;
use classroom_types::models::Announcement;

use crate::error::{ApiError, Result};
use crate::extract::Payload;
use crate::state::AppState;

/// POST /api/admin/announcements
pub async fn post_announcement(
    State(state): State<AppState>,
    Payload(req): Payload<AnnouncementRequest>,
) -> Result<Json<Announcement>> {
    if req.message.is_empty() {
        return Err(ApiError::BadRequest("message is required".into()));
    }

    let announcement = state.store.prepend_announcement(&req.message)?;

    state.publish(&HubEvent::Announcement(announcement.clone()));

    Ok(Json(announcement))
}

/// GET /api/announcements: newest first.
pub async fn list_announcements(State(state): State<AppState>) -> Result<Json<Vec<Announcement>>> {
    Ok(Json(state.store.list_announcements()?))
}
