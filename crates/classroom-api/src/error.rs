use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{debug, error};

pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors surfaced at the HTTP boundary as a status code and a plain-text body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid payload: {0}")]
    BadRequest(String),

    #[error("404 page not found")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Internal(e) => {
                error!("Internal error: {:#}", e);
                "internal server error".to_string()
            }
            other => {
                debug!("Rejected request: {}", other);
                other.to_string()
            }
        };
        (status, body).into_response()
    }
}
