use axum::{
    Json,
    extract::{Path, State},
};

use classroom_store::queries::NewFile;
use classroom_types::api::UploadFileRequest;
use classroom_types::events::HubEvent;
use classroom_types::models::SharedFile;

use crate::error::{ApiError, Result};
use crate::extract::Payload;
use crate::state::AppState;

/// GET /api/classes/{class_id}/files: newest first. Unknown classes give `[]`.
pub async fn list_files(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> Result<Json<Vec<SharedFile>>> {
    let files = state.store.list_files(&class_id)?;
    Ok(Json(newest_first(files)))
}

/// POST /api/classes/{class_id}/files: share a file reference with a class.
pub async fn upload_file(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
    Payload(req): Payload<UploadFileRequest>,
) -> Result<Json<SharedFile>> {
    if req.name.is_empty() {
        return Err(ApiError::BadRequest("name is required".into()));
    }

    let file = state.store.append_file(
        &class_id,
        NewFile {
            teacher_id: req.teacher_id,
            name: req.name,
            url: req.url,
        },
    )?;

    state.publish(&HubEvent::FileUploaded(file.clone()));

    Ok(Json(file))
}

/// Sort by `at` descending; records with equal `at` keep newest-inserted first.
fn newest_first(mut files: Vec<SharedFile>) -> Vec<SharedFile> {
    files.reverse();
    files.sort_by(|a, b| b.at.cmp(&a.at));
    files
}
