//! Custom Axum extractors
//!
//! Wrap the stock extractors so that rejections use the JSON error shape
//! instead of axum's plain-text bodies.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// JSON body; malformed or missing bodies are a 400
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest {
                reason: e.body_text(),
            })?;
        Ok(Self(value))
    }
}

/// Query string; unparseable values are a 400
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest {
                reason: e.body_text(),
            })?;
        Ok(Self(value))
    }
}

/// Extract a numeric id from the path.
///
/// A non-numeric segment cannot name any record, so it is a 404.
pub struct ValidId(pub i64);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest {
                reason: e.body_text(),
            })?;

        let id = raw.parse::<i64>().map_err(|_| ApiError::NotFound {
            resource: "record",
            id: raw.clone(),
        })?;

        Ok(Self(id))
    }
}
