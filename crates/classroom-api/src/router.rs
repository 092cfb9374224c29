use axum::{
    Json, Router, middleware,
    routing::{get, post},
};

use classroom_types::api::HealthResponse;

use crate::error::ApiError;
use crate::state::AppState;
use crate::{announcements, attendance, auth, files, stream};

/// Build the full HTTP surface. Tracing layers are added by the binary.
///
/// `GET` routes register an explicit `HEAD` handler so axum does not answer
/// `HEAD` with the `GET` handler; every other method is a 405.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health).head(method_not_allowed).fallback(method_not_allowed))
        .route("/api/auth/login", post(auth::login).fallback(method_not_allowed))
        .route(
            "/api/attendance/check",
            post(attendance::check).fallback(method_not_allowed),
        )
        .route(
            "/api/admin/attendance/report",
            get(attendance::report)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/classes/{class_id}/files",
            get(files::list_files)
                .head(method_not_allowed)
                .post(files::upload_file)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/admin/announcements",
            post(announcements::post_announcement).fallback(method_not_allowed),
        )
        .route(
            "/api/announcements",
            get(announcements::list_announcements)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route("/events", get(stream::events).head(method_not_allowed).fallback(method_not_allowed))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(crate::middleware::cors))
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
