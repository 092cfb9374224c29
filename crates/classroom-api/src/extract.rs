use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body extractor that reports every decoding failure as a 400.
///
/// Unlike `axum::Json` it doesn't insist on a `Content-Type` header; browsers
/// posting from plain `fetch` calls often leave it off.
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        serde_json::from_slice(&body)
            .map(Payload)
            .map_err(|e| ApiError::BadRequest(e.to_string()))
    }
}
