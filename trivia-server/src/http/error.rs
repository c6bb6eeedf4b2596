//! API error types with IntoResponse
//!
//! Every failure becomes `{success: false, error: <code>, message: <text>}`
//! with one fixed message per status code. Details go to the log only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use trivia_core::{TriviaError, ValidationError};

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request body or query could not be parsed (400)
    BadRequest { reason: String },

    /// Field values failed validation (422)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Well-formed request that cannot be satisfied (422)
    Unprocessable { reason: String },

    /// Internal error (500, logged)
    Internal { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Validation(_) | Self::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Fixed client-facing message for a status code
fn message_for(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "bad request",
        404 => "resource not found",
        422 => "unprocessable entity",
        _ => "internal server error",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            Self::BadRequest { reason } => tracing::debug!(%reason, "bad request"),
            Self::Validation(e) => tracing::debug!(error = %e, "validation failed"),
            Self::NotFound { resource, id } => tracing::debug!(resource, %id, "not found"),
            Self::Unprocessable { reason } => tracing::debug!(%reason, "unprocessable"),
            Self::Internal { message } => tracing::error!("Internal error: {}", message),
        }

        let body = json!({
            "success": false,
            "error": status.as_u16(),
            "message": message_for(status),
        });

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<TriviaError> for ApiError {
    fn from(e: TriviaError) -> Self {
        match e {
            TriviaError::Validation(v) => Self::Validation(v),
            TriviaError::NotFound { resource, id } => Self::NotFound { resource, id },
            TriviaError::Unprocessable { reason } => Self::Unprocessable { reason },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_422() {
        let err = ApiError::Validation(ValidationError::Empty { field: "answer" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 422);
        assert_eq!(body["message"], "unprocessable entity");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err: ApiError = TriviaError::question_not_found(9).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn internal_error_text_not_leaked() {
        let err: ApiError = TriviaError::internal("connection refused on 10.0.0.3").into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "internal server error");
        assert!(!body.to_string().contains("10.0.0.3"));
    }

    #[tokio::test]
    async fn bad_request_is_400() {
        let err = ApiError::BadRequest {
            reason: "expected value at line 1".into(),
        };
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
