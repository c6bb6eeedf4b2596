/// Structured error types for trivia-core.
///
/// Every engine operation returns one of these kinds. The HTTP layer maps
/// each kind to a fixed status code; binaries wrap them with `anyhow`.

use std::io;
use thiserror::Error;

use crate::models::ValidationError;

/// Main error type for trivia-core operations
#[derive(Error, Debug)]
pub enum TriviaError {
    /// Input was malformed or out of range
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced entity does not exist
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    /// Well-formed input that cannot be satisfied (e.g. a category with no questions)
    #[error("unprocessable: {reason}")]
    Unprocessable { reason: String },

    /// Unexpected failure in the backing store
    #[error("internal error: {message}")]
    Internal { message: String },

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// JSON parsing failed
    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },
}

/// Result type alias for trivia-core operations
pub type Result<T> = std::result::Result<T, TriviaError>;

impl TriviaError {
    /// Create a not-found error for a question id
    pub fn question_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "question",
            id: id.to_string(),
        }
    }

    /// Create a not-found error for a category id
    pub fn category_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "category",
            id: id.to_string(),
        }
    }

    /// Create an unprocessable error
    pub fn unprocessable(reason: impl Into<String>) -> Self {
        Self::Unprocessable {
            reason: reason.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a JSON error with context
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TriviaError::question_not_found(9);
        assert_eq!(err.to_string(), "question '9' not found");

        let err = TriviaError::unprocessable("category 4 has no questions");
        assert!(err.to_string().contains("category 4 has no questions"));
    }

    #[test]
    fn test_validation_conversion() {
        let err: TriviaError = ValidationError::Empty { field: "answer" }.into();
        assert!(matches!(err, TriviaError::Validation(_)));
        assert_eq!(err.to_string(), "validation failed: answer cannot be empty");
    }
}
